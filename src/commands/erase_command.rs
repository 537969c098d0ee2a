//! Metadata erase command
//!
//! Removes the selected metadata families from image files and writes
//! the stripped files back in place.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_files, run_per_file, FamilySelection};
use crate::errors::MetaResult;
use crate::formats;
use crate::utils::logger::Logger;

/// Command for erasing metadata families from files
pub struct EraseCommand<'a> {
    files: Vec<String>,
    families: FamilySelection,
    logger: &'a Logger,
}

impl<'a> EraseCommand<'a> {
    /// Create a new erase command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        Ok(EraseCommand {
            files: input_files(args)?,
            families: FamilySelection::from_args(args),
            logger,
        })
    }
}

impl<'a> Command for EraseCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            let mut image = formats::open(file)?;
            image.read_metadata()?;

            if self.families.exif {
                image.exif_data_mut().clear();
                image.exif_data_mut().thumbnail = None;
            }
            if self.families.iptc {
                image.iptc_data_mut().clear();
            }
            if self.families.xmp {
                image.xmp_data_mut().clear();
            }
            if self.families.comment {
                image.clear_comment();
            }

            image.write_metadata()?;
            info!("Erased metadata from {}", file);
            self.logger.log(&format!("Erased metadata from {}", file))?;
            Ok(())
        })
    }
}
