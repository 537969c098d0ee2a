//! Metadata extraction command
//!
//! Pulls metadata out of image files into sidecar files: an .exv
//! sidecar with the selected families, a raw .xmp packet, or the
//! embedded thumbnail image.

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

/// What kind of sidecar the extraction produces
enum ExtractTarget {
    Exv,
    XmpPacket,
    Thumbnail,
}

/// Command for extracting metadata into sidecar files
pub struct ExtractCommand<'a> {
    files: Vec<String>,
    families: FamilySelection,
    target: ExtractTarget,
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let target = if args.get_flag("thumbnail") {
            ExtractTarget::Thumbnail
        } else if args.get_flag("xmp-sidecar") {
            ExtractTarget::XmpPacket
        } else {
            ExtractTarget::Exv
        };
        Ok(ExtractCommand {
            files: input_files(args)?,
            families: FamilySelection::from_args(args),
            target,
            logger,
        })
    }

    fn sidecar_path(file: &str, extension: &str) -> String {
        Path::new(file)
            .with_extension(extension)
            .to_string_lossy()
            .to_string()
    }

    fn thumbnail_path(file: &str) -> String {
        let path = Path::new(file);
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        path.with_file_name(format!("{}-thumb.jpg", stem))
            .to_string_lossy()
            .to_string()
    }

    fn extract_one(&self, file: &str) -> MetaResult<()> {
        let mut image = formats::open(file)?;
        image.read_metadata()?;

        match self.target {
            ExtractTarget::Thumbnail => {
                let thumbnail = image
                    .exif_data()
                    .thumbnail
                    .as_deref()
                    .ok_or_else(|| MetaError::KeyNotFound("no thumbnail present".to_string()))?;
                let output = Self::thumbnail_path(file);
                fs::write(&output, thumbnail)?;
                info!("Wrote thumbnail {}", output);
            }
            ExtractTarget::XmpPacket => {
                if image.xmp_data().is_empty() {
                    return Err(MetaError::KeyNotFound("no XMP metadata present".to_string()));
                }
                let packet = xmp::codec::encode(image.xmp_data())?;
                let output = Self::sidecar_path(file, "xmp");
                fs::write(&output, packet)?;
                info!("Wrote XMP sidecar {}", output);
            }
            ExtractTarget::Exv => {
                let output = Self::sidecar_path(file, "exv");
                let mut sidecar = ExvFile::new(&output);
                if self.families.exif {
                    *sidecar.exif_data_mut() = image.exif_data().clone();
                }
                if self.families.iptc {
                    *sidecar.iptc_data_mut() = image.iptc_data().clone();
                }
                if self.families.xmp {
                    *sidecar.xmp_data_mut() = image.xmp_data().clone();
                }
                if self.families.comment {
                    if let Some(comment) = image.comment() {
                        sidecar.set_comment(comment)?;
                    }
                }
                sidecar.write_metadata()?;
                info!("Wrote sidecar {}", output);
            }
        }
        Ok(())
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            self.extract_one(file)?;
            self.logger.log(&format!("Extracted metadata of {}", file))?;
            Ok(())
        })
    }
}
