use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use metakit::commands::{CommandFactory, MetakitCommandFactory};
use metakit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("MetaKit")
        .version("0.1")
        .about("Read, edit and write Exif, IPTC and XMP metadata in image files")
        .arg(
            Arg::new("files")
                .help("Input image files")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract metadata into sidecar files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("insert")
                .short('i')
                .long("insert")
                .help("Insert metadata from sidecar files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("erase")
                .short('d')
                .long("erase")
                .help("Erase the selected metadata families")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("modify")
                .short('M')
                .long("modify")
                .help("Edit directive: 'set KEY [TYPE] VALUE', 'add KEY [TYPE] VALUE' or 'del KEY' (repeatable)")
                .value_name("DIRECTIVE")
                .action(ArgAction::Append)
                .required(false),
        )
        .arg(
            Arg::new("adjust")
                .short('a')
                .long("adjust")
                .help("Shift Exif timestamps by [-]HH:MM:SS or seconds")
                .value_name("OFFSET")
                .required(false),
        )
        .arg(
            Arg::new("exif")
                .long("exif")
                .help("Operate on Exif metadata")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("iptc")
                .long("iptc")
                .help("Operate on IPTC metadata")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("xmp")
                .long("xmp")
                .help("Operate on XMP metadata")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("comment")
                .long("comment")
                .help("Operate on the file comment")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("thumbnail")
                .short('t')
                .long("thumbnail")
                .help("Extract the embedded thumbnail instead of an .exv sidecar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("xmp-sidecar")
                .short('X')
                .long("xmp-sidecar")
                .help("Extract a raw .xmp packet instead of an .exv sidecar")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // RUST_LOG routes logging to the console; the file logger is the
    // default
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    } else if let Err(e) = Logger::init_global_logger("metakit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let log_file = "metakit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = MetakitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
