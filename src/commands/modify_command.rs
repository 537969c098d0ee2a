//! Metadata modify command
//!
//! Applies a list of edit directives to each file. A directive is one
//! of:
//!
//!   set KEY [TYPE] VALUE   replace the first entry, or append
//!   add KEY [TYPE] VALUE   always append
//!   del KEY                remove every entry with the key
//!
//! TYPE is an optional value type name (Ascii, Short, Rational, ...);
//! when omitted the key's natural type is used.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_files, run_per_file};
use crate::errors::{MetaError, MetaResult};
use crate::formats::{self, ImageFile};
use crate::iptc::datasets;
use crate::metadata::IptcKey;
use crate::utils::logger::Logger;
use crate::value::{TypeId, Value};

/// One parsed edit directive
#[derive(Debug)]
pub(crate) enum ModifyAction {
    Set { key: String, value: Value },
    Add { key: String, value: Value },
    Del { key: String },
}

fn type_from_name(name: &str) -> Option<TypeId> {
    match name {
        "Byte" => Some(TypeId::UnsignedByte),
        "Ascii" => Some(TypeId::AsciiString),
        "Short" => Some(TypeId::UnsignedShort),
        "Long" => Some(TypeId::UnsignedLong),
        "Rational" => Some(TypeId::UnsignedRational),
        "SByte" => Some(TypeId::SignedByte),
        "Undefined" => Some(TypeId::Undefined),
        "SShort" => Some(TypeId::SignedShort),
        "SLong" => Some(TypeId::SignedLong),
        "SRational" => Some(TypeId::SignedRational),
        "Float" => Some(TypeId::TiffFloat),
        "Double" => Some(TypeId::TiffDouble),
        "Date" => Some(TypeId::Date),
        "Time" => Some(TypeId::Time),
        "Comment" => Some(TypeId::Comment),
        "XmpText" => Some(TypeId::XmpText),
        "XmpBag" => Some(TypeId::XmpBag),
        "XmpSeq" => Some(TypeId::XmpSeq),
        "LangAlt" => Some(TypeId::LangAlt),
        _ => None,
    }
}

/// The type used when the directive does not name one
fn natural_type(key: &str) -> TypeId {
    if key.starts_with("Iptc.") {
        if let Ok(parsed) = IptcKey::parse(key) {
            if let Some(info) = datasets::dataset_info(parsed.record, parsed.dataset) {
                return info.type_id;
            }
        }
        return TypeId::AsciiString;
    }
    if key.starts_with("Xmp.") {
        return TypeId::XmpText;
    }
    TypeId::AsciiString
}

/// Parses one edit directive
pub(crate) fn parse_modify(directive: &str) -> MetaResult<ModifyAction> {
    let mut parts = directive.splitn(3, char::is_whitespace);
    let op = parts.next().unwrap_or_default();
    let key = parts
        .next()
        .ok_or_else(|| MetaError::InvalidValue(format!("missing key in '{}'", directive)))?
        .to_string();
    let rest = parts.next().unwrap_or("").trim();

    if op == "del" {
        return Ok(ModifyAction::Del { key });
    }
    if op != "set" && op != "add" {
        return Err(MetaError::InvalidValue(format!(
            "unknown modify operation '{}'",
            op
        )));
    }

    // An explicit leading type name overrides the key's natural type,
    // but only when a value follows it
    let (type_id, text) = match rest.split_once(char::is_whitespace) {
        Some((first, remainder)) => match type_from_name(first) {
            Some(explicit) => (explicit, remainder.trim()),
            None => (natural_type(&key), rest),
        },
        None => (natural_type(&key), rest),
    };
    if text.is_empty() {
        return Err(MetaError::InvalidValue(format!(
            "missing value in '{}'",
            directive
        )));
    }

    let mut value = Value::create(type_id);
    value.read_str(text)?;

    if op == "set" {
        Ok(ModifyAction::Set { key, value })
    } else {
        Ok(ModifyAction::Add { key, value })
    }
}

/// Applies one directive to the right family container
pub(crate) fn apply_action(image: &mut dyn ImageFile, action: &ModifyAction) -> MetaResult<()> {
    let key = match action {
        ModifyAction::Set { key, .. } | ModifyAction::Add { key, .. } | ModifyAction::Del { key } => {
            key.as_str()
        }
    };

    if key.starts_with("Exif.") {
        match action {
            ModifyAction::Set { key, value } => image.exif_data_mut().set(key, value.clone()),
            ModifyAction::Add { key, value } => image.exif_data_mut().add(key, value.clone()),
            ModifyAction::Del { key } => {
                image.exif_data_mut().erase_all(key);
                Ok(())
            }
        }
    } else if key.starts_with("Iptc.") {
        match action {
            ModifyAction::Set { key, value } => image.iptc_data_mut().set(key, value.clone()),
            ModifyAction::Add { key, value } => image.iptc_data_mut().add(key, value.clone()),
            ModifyAction::Del { key } => {
                image.iptc_data_mut().erase_all(key);
                Ok(())
            }
        }
    } else if key.starts_with("Xmp.") {
        match action {
            ModifyAction::Set { key, value } => image.xmp_data_mut().set(key, value.clone()),
            ModifyAction::Add { key, value } => image.xmp_data_mut().add(key, value.clone()),
            ModifyAction::Del { key } => {
                image.xmp_data_mut().erase_all(key);
                Ok(())
            }
        }
    } else {
        Err(MetaError::InvalidKey(key.to_string()))
    }
}

/// Command for applying edit directives to files
pub struct ModifyCommand<'a> {
    files: Vec<String>,
    actions: Vec<ModifyAction>,
    logger: &'a Logger,
}

impl<'a> ModifyCommand<'a> {
    /// Create a new modify command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let actions = args
            .get_many::<String>("modify")
            .map(|values| values.map(|v| parse_modify(v)).collect::<MetaResult<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();
        if actions.is_empty() {
            return Err(MetaError::GenericError("Missing modify directives".to_string()));
        }
        Ok(ModifyCommand {
            files: input_files(args)?,
            actions,
            logger,
        })
    }
}

impl<'a> Command for ModifyCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            let mut image = formats::open(file)?;
            image.read_metadata()?;

            for action in &self.actions {
                apply_action(image.as_mut(), action)?;
            }

            image.write_metadata()?;
            info!("Applied {} directive(s) to {}", self.actions.len(), file);
            self.logger.log(&format!("Modified {}", file))?;
            Ok(())
        })
    }
}
