use log::info;

use crate::commands::modify_command::{apply_action, parse_modify};
use crate::errors::{MetaError, MetaResult};
use crate::formats::{self, ImageFile};
use crate::utils::logger::Logger;

/// Main interface to the MetaKit library
pub struct MetaKit {
    logger: Logger,
}

impl MetaKit {
    /// Create a new MetaKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "metakit.log"
    ///
    /// # Returns
    /// A MetaKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> MetaResult<Self> {
        let log_path = log_file.unwrap_or("metakit.log");
        let logger = Logger::new(log_path)?;
        Ok(MetaKit { logger })
    }

    /// Open an image file and load all of its metadata
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// The loaded image, ready for container access, or an error
    pub fn read(&self, path: &str) -> MetaResult<Box<dyn ImageFile>> {
        let mut image = formats::open(path)?;
        image.read_metadata()?;
        Ok(image)
    }

    /// Summarize the metadata of a file
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// String listing every metadata entry, or an error
    pub fn describe(&self, path: &str) -> MetaResult<String> {
        let image = self.read(path)?;

        let mut result = format!("Metadata of {} ({}):\n", path, image.format_name());
        for entry in image.exif_data().iter() {
            result.push_str(&format!("  {}\n", entry));
        }
        for entry in image.iptc_data().iter() {
            result.push_str(&format!("  {}\n", entry));
        }
        for entry in image.xmp_data().iter() {
            result.push_str(&format!("  {}\n", entry));
        }
        if let Some(comment) = image.comment() {
            result.push_str(&format!("  Comment: {}\n", comment));
        }
        if let Some(thumbnail) = &image.exif_data().thumbnail {
            result.push_str(&format!("  Thumbnail: {} bytes\n", thumbnail.len()));
        }
        Ok(result)
    }

    /// Look up one metadata value as a string
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    /// * `key` - Full metadata key, e.g. "Exif.Image.Make"
    ///
    /// # Returns
    /// The value in its textual form, or an error if the key is absent
    pub fn value_of(&self, path: &str, key: &str) -> MetaResult<String> {
        let image = self.read(path)?;
        let value = if key.starts_with("Exif.") {
            image.exif_data().find_key(key)
        } else if key.starts_with("Iptc.") {
            image.iptc_data().find_key(key)
        } else if key.starts_with("Xmp.") {
            image.xmp_data().find_key(key)
        } else {
            return Err(MetaError::InvalidKey(key.to_string()));
        };
        value
            .map(|v| v.to_string())
            .ok_or_else(|| MetaError::KeyNotFound(key.to_string()))
    }

    /// Apply edit directives to a file and save it
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    /// * `directives` - Edit directives, e.g. "set Exif.Image.Make TestCam"
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn modify(&self, path: &str, directives: &[&str]) -> MetaResult<()> {
        let mut image = self.read(path)?;
        for directive in directives {
            let action = parse_modify(directive)?;
            apply_action(image.as_mut(), &action)?;
        }
        image.write_metadata()?;

        info!("Applied {} directive(s) to {}", directives.len(), path);
        self.logger.log(&format!("Modified {}", path))?;
        Ok(())
    }

    /// Remove all metadata from a file and save it
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn erase(&self, path: &str) -> MetaResult<()> {
        let mut image = self.read(path)?;
        image.exif_data_mut().clear();
        image.exif_data_mut().thumbnail = None;
        image.iptc_data_mut().clear();
        image.xmp_data_mut().clear();
        image.clear_comment();
        image.write_metadata()?;

        self.logger.log(&format!("Erased metadata of {}", path))?;
        Ok(())
    }

    /// Extract the embedded thumbnail to its own file
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    /// * `output_path` - Path where to save the thumbnail image
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn extract_thumbnail(&self, path: &str, output_path: &str) -> MetaResult<()> {
        let image = self.read(path)?;
        let thumbnail = image
            .exif_data()
            .thumbnail
            .as_deref()
            .ok_or_else(|| MetaError::KeyNotFound("no thumbnail present".to_string()))?;
        std::fs::write(output_path, thumbnail)?;

        info!("Wrote thumbnail {} ({} bytes)", output_path, thumbnail.len());
        self.logger.log(&format!("Extracted thumbnail of {}", path))?;
        Ok(())
    }
}
