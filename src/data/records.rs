use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::foundation::error::{PocketError, PocketResult};

/// A Fake News Fact Checkers entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FactRecord {
    /// Fact number, used in the output file name.
    pub fact_num: u32,
    /// Text revealed sentence by sentence.
    pub fact: String,
}

/// A Lightly Steamed entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewRecord {
    /// Game the review belongs to (output directory).
    pub game_num: u32,
    /// Review number within the game (output subdirectory).
    pub review_num: u32,
    /// Reviewer name.
    pub username: String,
    /// Hours on record; may be fractional.
    pub hours: f64,
    /// Review body; may contain line breaks.
    pub review: String,
}

/// Read a JSON array of records.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> PocketResult<Vec<T>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read data file '{}'", path.display()))?;
    parse_records(&json).map_err(|e| match e {
        PocketError::Data(msg) => PocketError::data(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Parse a JSON array of records.
pub fn parse_records<T: DeserializeOwned>(json: &str) -> PocketResult<Vec<T>> {
    serde_json::from_str(json).map_err(|e| PocketError::data(format!("parse records JSON: {e}")))
}

/// Format hours the way an en-US locale does: thousands separators, up to three decimals.
///
/// ```
/// assert_eq!(pocketpals::format_hours(1234.5), "1,234.5");
/// ```
pub fn format_hours(hours: f64) -> String {
    let rounded = (hours * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();

    let fixed = format!("{abs:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/records.rs"]
mod tests;
