//! Metadata insertion command
//!
//! Applies metadata from a sidecar file back into an image: an .exv
//! sidecar next to the image, or a raw .xmp packet when no .exv exists.

use std::fs;
use std::path::Path;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_files, run_per_file, FamilySelection};
use crate::errors::{MetaError, MetaResult};
use crate::formats::{self, ExvFile, ImageFile};
use crate::utils::logger::Logger;
use crate::xmp;

/// Command for inserting metadata from sidecar files
pub struct InsertCommand<'a> {
    files: Vec<String>,
    families: FamilySelection,
    logger: &'a Logger,
}

impl<'a> InsertCommand<'a> {
    /// Create a new insert command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        Ok(InsertCommand {
            files: input_files(args)?,
            families: FamilySelection::from_args(args),
            logger,
        })
    }

    fn insert_one(&self, file: &str) -> MetaResult<()> {
        let mut image = formats::open(file)?;
        image.read_metadata()?;

        let exv_path = Path::new(file).with_extension("exv");
        let xmp_path = Path::new(file).with_extension("xmp");

        if exv_path.exists() {
            let mut sidecar = ExvFile::new(&exv_path.to_string_lossy());
            sidecar.read_metadata()?;
            if self.families.exif {
                *image.exif_data_mut() = sidecar.exif_data().clone();
            }
            if self.families.iptc {
                *image.iptc_data_mut() = sidecar.iptc_data().clone();
            }
            if self.families.xmp {
                *image.xmp_data_mut() = sidecar.xmp_data().clone();
            }
            if self.families.comment {
                if let Some(comment) = sidecar.comment() {
                    image.set_comment(comment)?;
                }
            }
            info!("Inserted sidecar {} into {}", exv_path.display(), file);
        } else if xmp_path.exists() {
            let packet = fs::read(&xmp_path)?;
            *image.xmp_data_mut() = xmp::codec::decode(&packet)?;
            info!("Inserted XMP packet {} into {}", xmp_path.display(), file);
        } else {
            return Err(MetaError::GenericError(format!(
                "no sidecar found for {}",
                file
            )));
        }

        image.write_metadata()
    }
}

impl<'a> Command for InsertCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            self.insert_one(file)?;
            self.logger.log(&format!("Inserted metadata into {}", file))?;
            Ok(())
        })
    }
}
