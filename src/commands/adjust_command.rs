//! Timestamp adjustment command
//!
//! Shifts the Exif timestamp tags of each file by a signed offset
//! given as `[-]HH:MM:SS` (or a bare number of seconds).

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::commands::{input_files, run_per_file};
use crate::errors::{MetaError, MetaResult};
use crate::formats;
use crate::utils::logger::Logger;
use crate::value::Value;

/// Tags carrying a "YYYY:MM:DD HH:MM:SS" timestamp
const DATE_TIME_KEYS: [&str; 3] = [
    "Exif.Image.DateTime",
    "Exif.Photo.DateTimeOriginal",
    "Exif.Photo.DateTimeDigitized",
];

/// Parses a `[-]HH:MM:SS` or bare-seconds offset into signed seconds
pub(crate) fn parse_shift(text: &str) -> MetaResult<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let seconds = if body.contains(':') {
        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() != 3 {
            return Err(MetaError::InvalidValue(format!("invalid time offset: {}", text)));
        }
        let mut total = 0i64;
        for part in &parts {
            let field: i64 = part
                .parse()
                .map_err(|_| MetaError::InvalidValue(format!("invalid time offset: {}", text)))?;
            total = total * 60 + field;
        }
        total
    } else {
        body.parse::<i64>()
            .map_err(|_| MetaError::InvalidValue(format!("invalid time offset: {}", text)))?
    };

    Ok(if negative { -seconds } else { seconds })
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Inverse of `days_from_civil`
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    (if month <= 2 { y + 1 } else { y }, month, day)
}

/// Shifts an Exif "YYYY:MM:DD HH:MM:SS" timestamp by signed seconds
pub(crate) fn shift_timestamp(text: &str, shift: i64) -> MetaResult<String> {
    let fields: Vec<i64> = text
        .split(|c| c == ':' || c == ' ')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| MetaError::InvalidValue(format!("invalid timestamp: {}", text)))?;
    if fields.len() != 6 {
        return Err(MetaError::InvalidValue(format!("invalid timestamp: {}", text)));
    }

    let days = days_from_civil(fields[0], fields[1] as u32, fields[2] as u32);
    let total = days * 86400 + fields[3] * 3600 + fields[4] * 60 + fields[5] + shift;

    let (year, month, day) = civil_from_days(total.div_euclid(86400));
    let secs = total.rem_euclid(86400);
    Ok(format!(
        "{:04}:{:02}:{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    ))
}

/// Command for shifting Exif timestamps
pub struct AdjustCommand<'a> {
    files: Vec<String>,
    shift: i64,
    logger: &'a Logger,
}

impl<'a> AdjustCommand<'a> {
    /// Create a new adjust command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> MetaResult<Self> {
        let text = args
            .get_one::<String>("adjust")
            .ok_or_else(|| MetaError::GenericError("Missing time offset".to_string()))?;
        Ok(AdjustCommand {
            files: input_files(args)?,
            shift: parse_shift(text)?,
            logger,
        })
    }
}

impl<'a> Command for AdjustCommand<'a> {
    fn execute(&self) -> MetaResult<()> {
        run_per_file(&self.files, |file| {
            let mut image = formats::open(file)?;
            image.read_metadata()?;

            let mut adjusted = 0usize;
            for key in DATE_TIME_KEYS {
                let Some(text) = image.exif_data().find_key(key).map(|v| v.to_string()) else {
                    continue;
                };
                match shift_timestamp(&text, self.shift) {
                    Ok(updated) => {
                        image.exif_data_mut().set(key, Value::ascii_from_str(&updated))?;
                        adjusted += 1;
                    }
                    Err(err) => warn!("Leaving {} untouched: {}", key, err),
                }
            }
            if adjusted == 0 {
                return Err(MetaError::KeyNotFound("no timestamp tags present".to_string()));
            }

            image.write_metadata()?;
            info!("Adjusted {} timestamp(s) in {} by {}s", adjusted, file, self.shift);
            self.logger.log(&format!("Adjusted timestamps of {}", file))?;
            Ok(())
        })
    }
}
