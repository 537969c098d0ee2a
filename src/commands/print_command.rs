//! Metadata listing command
//!
//! Prints every entry of the selected metadata families as
//! key, type, count and value columns, one line per entry.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_files, run_per_file, FamilySelection};
use crate::errors::MetaResult;
use crate::formats;
use crate::metadata::Metadatum;
use crate::utils::logger::Logger;

/// Command for printing metadata to standard output
pub struct PrintCommand<'a> {
    files: Vec<String>,
    families: FamilySelection,
    logger: &'a Logger,
}

impl<'a> PrintCommand<'a> {
    /// Create a new print command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        Ok(PrintCommand {
            files: input_files(args)?,
            families: FamilySelection::from_args(args),
            logger,
        })
    }

    fn print_entry(entry: &Metadatum) {
        println!(
            "{:<44} {:<10} {:>4}  {}",
            entry.key,
            entry.value.type_id().name(),
            entry.value.count(),
            entry.value
        );
    }
}

impl<'a> Command for PrintCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            info!("Printing metadata of {}", file);
            let mut image = formats::open(file)?;
            image.read_metadata()?;

            if self.files.len() > 1 {
                println!("File: {}", file);
            }
            if self.families.exif {
                for entry in image.exif_data().iter() {
                    Self::print_entry(entry);
                }
            }
            if self.families.iptc {
                for entry in image.iptc_data().iter() {
                    Self::print_entry(entry);
                }
            }
            if self.families.xmp {
                for entry in image.xmp_data().iter() {
                    Self::print_entry(entry);
                }
            }
            if self.families.comment {
                if let Some(comment) = image.comment() {
                    println!("Comment: {}", comment);
                }
            }

            self.logger.log(&format!("Printed metadata of {}", file))?;
            Ok(())
        })
    }
}
