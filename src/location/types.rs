//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One administrative level of a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Province,
    City,
    County,
    /// Retired county names, consulted only to infer a city.
    LegacyCounty,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Province => write!(f, "province"),
            Self::City => write!(f, "city"),
            Self::County => write!(f, "county"),
            Self::LegacyCounty => write!(f, "county_legacy"),
        }
    }
}

/// A `(name, code)` pair from one of the reference dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub name: String,
    pub code: u32,
}

impl DictionaryEntry {
    pub fn new(name: impl Into<String>, code: u32) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// The four ordered dictionaries as handed over by a provider.
///
/// Array order is the canonical iteration order and breaks ties between
/// matches that start at the same offset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryTables {
    #[serde(default)]
    pub provinces: Vec<DictionaryEntry>,
    #[serde(default)]
    pub cities: Vec<DictionaryEntry>,
    #[serde(default)]
    pub counties: Vec<DictionaryEntry>,
    #[serde(default)]
    pub counties_legacy: Vec<DictionaryEntry>,
}

/// A dictionary entry found inside an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub entry: &'a DictionaryEntry,
    /// Byte offset of the earliest occurrence of `entry.name`.
    pub offset: usize,
}

/// Administrative breakdown of one input string.
///
/// A code is present exactly when its name is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub province: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub province_code: Option<u32>,
    pub city_code: Option<u32>,
    pub county_code: Option<u32>,
}

impl LocationMatch {
    /// The fully-empty result: all six fields absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn set_province(&mut self, entry: &DictionaryEntry) {
        self.province = Some(entry.name.clone());
        self.province_code = Some(entry.code);
    }

    pub(crate) fn set_city(&mut self, entry: &DictionaryEntry) {
        self.city = Some(entry.name.clone());
        self.city_code = Some(entry.code);
    }

    pub(crate) fn set_county(&mut self, entry: &DictionaryEntry) {
        self.county = Some(entry.name.clone());
        self.county_code = Some(entry.code);
    }
}

/// An input string echoed next to its resolution, one row of batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLocation {
    pub location: Option<String>,
    #[serde(flatten)]
    pub resolved: LocationMatch,
}

/// Errors raised while obtaining dictionaries.
///
/// Resolution itself never fails; only providers do.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Cannot read dictionary file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dictionary JSON in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_match() {
        let m = LocationMatch::empty();
        assert!(m.is_empty());
        assert!(m.province.is_none() && m.province_code.is_none());
    }

    #[test]
    fn test_setters_keep_name_and_code_paired() {
        let mut m = LocationMatch::empty();
        m.set_city(&DictionaryEntry::new("杭州市", 3301));
        assert_eq!(m.city.as_deref(), Some("杭州市"));
        assert_eq!(m.city_code, Some(3301));
        assert!(!m.is_empty());
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let row = AnnotatedLocation {
            location: None,
            resolved: LocationMatch::empty(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["location"].is_null());
        assert!(json["province"].is_null());
        assert!(json["county_code"].is_null());
    }

    #[test]
    fn test_tables_legacy_optional() {
        let json = r#"{
            "provinces": [{"name": "浙江省", "code": 33}],
            "cities": [],
            "counties": []
        }"#;
        let tables: DictionaryTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.provinces.len(), 1);
        assert!(tables.counties_legacy.is_empty());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::LegacyCounty.to_string(), "county_legacy");
        assert_eq!(Level::City.to_string(), "city");
    }
}
