//! Hierarchical resolver: top-down matching, then bottom-up fallback.
//!
//! Matching flow:  province → city (under province) → county (under city or province)
//! Fallback flow:  legacy county → city,  county → city,  city → province

use tracing::trace;

use super::dictionary::DictionaryStore;
use super::matcher;
use super::types::{DictionaryEntry, Level, LocationMatch};

/// Digits of a city code taken from the front of a county code.
const CITY_DIGITS: usize = 4;
/// Digits of a province code taken from the front of a city code.
const PROVINCE_DIGITS: usize = 2;

/// Resolves address strings against a borrowed dictionary store.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    store: &'a DictionaryStore,
}

impl<'a> LocationResolver<'a> {
    pub fn new(store: &'a DictionaryStore) -> Self {
        Self { store }
    }

    /// Resolve one address string into province, city and county.
    pub fn resolve(&self, input: &str) -> LocationMatch {
        let mut out = LocationMatch::empty();

        // 1. Province, unconstrained.
        if let Some(province) = self.best_match(Level::Province, input, None) {
            out.set_province(province);
        }

        // 2. City, under the province if there is one.
        let province_prefix = out.province_code.map(|c| c.to_string());
        if let Some(city) = self.best_match(Level::City, input, province_prefix.as_deref()) {
            out.set_city(city);
        }

        // 3. County, under the most specific resolved parent.
        let parent_prefix = out
            .city_code
            .or(out.province_code)
            .map(|c| c.to_string());
        if let Some(county) = self.best_match(Level::County, input, parent_prefix.as_deref()) {
            out.set_county(county);
        }

        // 4. Neither city nor county: infer the city from a retired county name.
        if out.city_code.is_none() && out.county_code.is_none() {
            if let Some(legacy) = self.best_match(Level::LegacyCounty, input, None) {
                if let Some(city) = self.city_from_code(legacy.code) {
                    trace!(legacy = %legacy.name, city = %city.name, "city inferred from legacy county");
                    out.set_city(city);
                }
            }
        }

        // 5. County without city: the county code carries its city.
        if out.city_code.is_none() {
            if let Some(county_code) = out.county_code {
                if let Some(city) = self.city_from_code(county_code) {
                    trace!(county_code, city = %city.name, "city inferred from county");
                    out.set_city(city);
                }
            }
        }

        // 6. City without province: the city code carries its province.
        if out.province_code.is_none() {
            if let Some(city_code) = out.city_code {
                if let Some(province) = digit_prefix(city_code, PROVINCE_DIGITS)
                    .and_then(|code| self.store.entry_by_code(Level::Province, code))
                {
                    trace!(city_code, province = %province.name, "province inferred from city");
                    out.set_province(province);
                }
            }
        }

        out
    }

    /// Earliest-occurring entry at `level` whose code sits under `parent_prefix`.
    fn best_match(
        &self,
        level: Level,
        input: &str,
        parent_prefix: Option<&str>,
    ) -> Option<&'a DictionaryEntry> {
        let candidates = self.store.candidates(level, input, parent_prefix);
        let picked = matcher::pick_earliest(input, &candidates)?;
        trace!(%level, name = %picked.entry.name, code = picked.entry.code, offset = picked.offset, "matched");
        Some(picked.entry)
    }

    /// City whose code is the first four digits of `code`, if it exists.
    fn city_from_code(&self, code: u32) -> Option<&'a DictionaryEntry> {
        let city_code = digit_prefix(code, CITY_DIGITS)?;
        if !self.store.is_valid_city_code(city_code) {
            return None;
        }
        self.store.entry_by_code(Level::City, city_code)
    }
}

/// First `len` decimal digits of `code`, re-read as an integer.
///
/// Codes shorter than `len` digits have no such prefix and yield `None`,
/// so no fallback is ever derived from a truncated code.
pub fn digit_prefix(code: u32, len: usize) -> Option<u32> {
    let digits = code.to_string();
    if len == 0 || digits.len() < len {
        return None;
    }
    digits[..len].parse().ok()
}
