//! Binary class label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `0` = legitimate, `1` = phishing. Never missing, never continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    /// Both classes, in index order.
    pub const ALL: [Label; 2] = [Label::Legitimate, Label::Phishing];

    /// Numeric value as stored in data files.
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    pub fn index(self) -> usize {
        self.as_u8() as usize
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Label::Legitimate),
            1 => Some(Label::Phishing),
            _ => None,
        }
    }

    /// Parses a label cell. Accepts `0`/`1`, and their float spellings written
    /// by tools that store integer columns as floats (`0.0`, `1.0`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0" | "0.0" => Some(Label::Legitimate),
            "1" | "1.0" => Some(Label::Phishing),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Legitimate => "Legitimate",
            Label::Phishing => "Phishing",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_binary_values() {
        assert_eq!(Label::parse("0"), Some(Label::Legitimate));
        assert_eq!(Label::parse(" 1 "), Some(Label::Phishing));
        assert_eq!(Label::parse("1.0"), Some(Label::Phishing));
        assert_eq!(Label::parse("2"), None);
        assert_eq!(Label::parse(""), None);
        assert_eq!(Label::parse("0.5"), None);
    }

    #[test]
    fn display_matches_cli_categories() {
        assert_eq!(Label::Legitimate.to_string(), "Legitimate (0)");
        assert_eq!(Label::Phishing.to_string(), "Phishing (1)");
    }
}
