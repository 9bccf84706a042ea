//! Dashed daily-note names and their compact form.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Year, month and day digits taken from a `YYYY-MM-DD` file name.
///
/// The digits are kept verbatim; `2024-13-40` is a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateToken {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateToken {
    /// `YYYYMMDD`.
    pub fn compact(&self) -> String {
        format!("{}{}{}", self.year, self.month, self.day)
    }
}

/// Matches whole file names of the form `YYYY-MM-DD.<extension>`.
#[derive(Debug, Clone)]
pub struct DatePattern {
    regex: Regex,
    extension: String,
}

impl DatePattern {
    /// Build the pattern for a document extension (without the dot).
    pub fn new(extension: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"^([0-9]{{4}})-([0-9]{{2}})-([0-9]{{2}})\.{}$",
            regex::escape(extension)
        ))?;
        Ok(Self {
            regex,
            extension: extension.to_string(),
        })
    }

    /// Extract the date token from a file name, if it matches exactly.
    pub fn parse(&self, file_name: &str) -> Option<DateToken> {
        let caps = self.regex.captures(file_name)?;
        Some(DateToken {
            year: caps[1].to_string(),
            month: caps[2].to_string(),
            day: caps[3].to_string(),
        })
    }

    /// Compact file name for a token: `YYYYMMDD.<extension>`.
    pub fn target_name(&self, token: &DateToken) -> String {
        format!("{}.{}", token.compact(), self.extension)
    }

    /// Compact file name for a dashed name, if it matches.
    pub fn rename_target(&self, file_name: &str) -> Option<String> {
        self.parse(file_name).map(|token| self.target_name(&token))
    }
}
