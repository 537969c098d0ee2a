//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod adjust_command;
pub mod erase_command;
pub mod extract_command;
pub mod insert_command;
pub mod modify_command;
pub mod print_command;

pub use command_traits::{Command, CommandFactory};
pub use adjust_command::AdjustCommand;
pub use erase_command::EraseCommand;
pub use extract_command::ExtractCommand;
pub use insert_command::InsertCommand;
pub use modify_command::ModifyCommand;
pub use print_command::PrintCommand;

use clap::ArgMatches;
use log::error;

use crate::errors::{MetaError, MetaResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct MetakitCommandFactory;

impl MetakitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        MetakitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for MetakitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> MetaResult<Box<dyn Command + 'a>> {
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else if args.get_flag("insert") {
            Ok(Box::new(InsertCommand::new(args, logger)?))
        } else if args.get_flag("erase") {
            Ok(Box::new(EraseCommand::new(args, logger)?))
        } else if args.contains_id("modify") {
            Ok(Box::new(ModifyCommand::new(args, logger)?))
        } else if args.contains_id("adjust") {
            Ok(Box::new(AdjustCommand::new(args, logger)?))
        } else {
            // Default to printing the metadata
            Ok(Box::new(PrintCommand::new(args, logger)?))
        }
    }
}

/// Which metadata families a command operates on
#[derive(Debug, Clone, Copy)]
pub(crate) struct FamilySelection {
    pub exif: bool,
    pub iptc: bool,
    pub xmp: bool,
    pub comment: bool,
}

impl FamilySelection {
    /// Reads the family flags; no flag at all selects everything
    pub fn from_args(args: &ArgMatches) -> Self {
        let exif = args.get_flag("exif");
        let iptc = args.get_flag("iptc");
        let xmp = args.get_flag("xmp");
        let comment = args.get_flag("comment");
        if !exif && !iptc && !xmp && !comment {
            return FamilySelection { exif: true, iptc: true, xmp: true, comment: true };
        }
        FamilySelection { exif, iptc, xmp, comment }
    }
}

/// Reads the positional file arguments
pub(crate) fn input_files(args: &ArgMatches) -> MetaResult<Vec<String>> {
    let files: Vec<String> = args
        .get_many::<String>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if files.is_empty() {
        return Err(MetaError::GenericError("Missing input file".to_string()));
    }
    Ok(files)
}

/// Runs an action over every file, isolating failures per file
///
/// A failing file is reported on stderr and the batch continues; the
/// overall command fails only after every file has been attempted.
pub(crate) fn run_per_file<F>(files: &[String], mut action: F) -> MetaResult<()>
where
    F: FnMut(&str) -> MetaResult<()>,
{
    let mut failures = 0usize;
    for file in files {
        if let Err(err) = action(file) {
            error!("Processing {} failed: {}", file, err);
            eprintln!("{}: {}", file, err);
            failures += 1;
        }
    }
    if failures > 0 {
        return Err(MetaError::GenericError(format!(
            "{} of {} file(s) failed",
            failures,
            files.len()
        )));
    }
    Ok(())
}
