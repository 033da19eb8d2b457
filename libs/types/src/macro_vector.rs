//! Macro vector key
//!
//! Six equivalence-class levels (EQ1..EQ6) rendered as a digit string,
//! e.g. `"002201"`. Used to index the scoring lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of equivalence classes in a CVSS v4.0 macro vector
pub const EQ_COUNT: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid macro vector {0:?}: expected 6 digits")]
pub struct ParseMacroVectorError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacroVector([u8; EQ_COUNT]);

impl MacroVector {
    pub fn new(levels: [u8; EQ_COUNT]) -> Self {
        Self(levels)
    }

    /// Level of equivalence class `eq` (1-based, as in EQ1..EQ6)
    pub fn level(&self, eq: usize) -> Option<u8> {
        eq.checked_sub(1).and_then(|i| self.0.get(i).copied())
    }

    pub fn levels(&self) -> [u8; EQ_COUNT] {
        self.0
    }
}

impl fmt::Display for MacroVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.0 {
            write!(f, "{}", level)?;
        }
        Ok(())
    }
}

impl FromStr for MacroVector {
    type Err = ParseMacroVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u8> = s
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| ParseMacroVectorError(s.to_string()))?;

        let levels: [u8; EQ_COUNT] = digits
            .try_into()
            .map_err(|_| ParseMacroVectorError(s.to_string()))?;
        Ok(Self(levels))
    }
}

impl TryFrom<String> for MacroVector {
    type Error = ParseMacroVectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacroVector> for String {
    fn from(value: MacroVector) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let mv = MacroVector::new([0, 0, 2, 2, 0, 1]);
        assert_eq!(mv.to_string(), "002201");
        assert_eq!("002201".parse::<MacroVector>().unwrap(), mv);
    }

    #[test]
    fn test_level_accessor_is_one_based() {
        let mv = MacroVector::new([2, 1, 0, 1, 2, 0]);
        assert_eq!(mv.level(1), Some(2));
        assert_eq!(mv.level(5), Some(2));
        assert_eq!(mv.level(0), None);
        assert_eq!(mv.level(7), None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("00220".parse::<MacroVector>().is_err());
        assert!("0022011".parse::<MacroVector>().is_err());
        assert!("00a201".parse::<MacroVector>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let mv = MacroVector::new([1, 1, 1, 0, 0, 1]);
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, "\"111001\"");
        let back: MacroVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }
}
