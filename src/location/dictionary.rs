//! Immutable name/code dictionaries for every administrative level.

use std::collections::HashSet;

use tracing::info;

use super::matcher;
use super::providers::DictionaryProvider;
use super::types::{Candidate, DictionaryEntry, DictionaryTables, Level, Result};

/// Read-only store over the four level dictionaries.
///
/// Built once, then shared. Every query scans in dictionary order, so the
/// first matching entry always wins.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    provinces: Vec<DictionaryEntry>,
    cities: Vec<DictionaryEntry>,
    counties: Vec<DictionaryEntry>,
    counties_legacy: Vec<DictionaryEntry>,
    city_codes: HashSet<u32>,
}

impl DictionaryStore {
    pub fn new(tables: DictionaryTables) -> Self {
        let city_codes = tables.cities.iter().map(|e| e.code).collect();
        Self {
            provinces: tables.provinces,
            cities: tables.cities,
            counties: tables.counties,
            counties_legacy: tables.counties_legacy,
            city_codes,
        }
    }

    /// Load tables from a provider and build the store.
    pub fn from_provider<P: DictionaryProvider + ?Sized>(provider: &P) -> Result<Self> {
        let store = Self::new(provider.load()?);
        info!(
            provinces = store.provinces.len(),
            cities = store.cities.len(),
            counties = store.counties.len(),
            counties_legacy = store.counties_legacy.len(),
            "dictionary loaded from {}",
            provider.describe()
        );
        Ok(store)
    }

    pub fn entries(&self, level: Level) -> &[DictionaryEntry] {
        match level {
            Level::Province => &self.provinces,
            Level::City => &self.cities,
            Level::County => &self.counties,
            Level::LegacyCounty => &self.counties_legacy,
        }
    }

    pub fn len(&self, level: Level) -> usize {
        self.entries(level).len()
    }

    /// Code of the first entry at `level` named exactly `name`.
    pub fn name_to_code(&self, level: Level, name: &str) -> Option<u32> {
        self.entries(level)
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.code)
    }

    /// Name of the first entry at `level` carrying `code`.
    pub fn code_to_name(&self, level: Level, code: u32) -> Option<&str> {
        self.entry_by_code(level, code).map(|e| e.name.as_str())
    }

    pub(crate) fn entry_by_code(&self, level: Level, code: u32) -> Option<&DictionaryEntry> {
        self.entries(level).iter().find(|e| e.code == code)
    }

    /// Entries at `level` whose name occurs in `input`, in dictionary order.
    ///
    /// With `parent_prefix`, only entries whose decimal code starts with it
    /// are kept.
    pub fn candidates<'a>(
        &'a self,
        level: Level,
        input: &str,
        parent_prefix: Option<&str>,
    ) -> Vec<Candidate<'a>> {
        self.entries(level)
            .iter()
            .filter(|e| match parent_prefix {
                Some(prefix) => e.code.to_string().starts_with(prefix),
                None => true,
            })
            .filter_map(|e| {
                matcher::earliest_index(input, &e.name).map(|offset| Candidate { entry: e, offset })
            })
            .collect()
    }

    pub fn is_valid_city_code(&self, code: u32) -> bool {
        self.city_codes.contains(&code)
    }
}
