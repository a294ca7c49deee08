//! Dictionary providers: JSON files on disk and a built-in sample dataset.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::types::{DictionaryEntry, DictionaryError, DictionaryTables, Result};

/// Source of the four ordered dictionaries.
pub trait DictionaryProvider {
    fn load(&self) -> Result<DictionaryTables>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

// ─── JSON file ──────────────────────────────────────────────────

/// Reads `{ "provinces": [...], "cities": [...], "counties": [...], "counties_legacy": [...] }`
/// where every element is `{ "name": "...", "code": 123 }`.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DictionaryProvider for JsonFileProvider {
    fn load(&self) -> Result<DictionaryTables> {
        let data = fs::read_to_string(&self.path).map_err(|source| DictionaryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let tables: DictionaryTables =
            serde_json::from_str(&data).map_err(|source| DictionaryError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = data.len(), "parsed dictionary file");
        Ok(tables)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ─── Built-in dataset ───────────────────────────────────────────

const BUILTIN_PROVINCES: &[(&str, u32)] = &[
    ("北京市", 11),
    ("天津市", 12),
    ("河北省", 13),
    ("吉林省", 22),
    ("上海市", 31),
    ("江苏省", 32),
    ("浙江省", 33),
    ("广东省", 44),
    ("四川省", 51),
];

const BUILTIN_CITIES: &[(&str, u32)] = &[
    ("北京市", 1101),
    ("天津市", 1201),
    ("石家庄市", 1301),
    ("唐山市", 1302),
    ("长春市", 2201),
    ("上海市", 3101),
    ("南京市", 3201),
    ("无锡市", 3202),
    ("苏州市", 3205),
    ("杭州市", 3301),
    ("宁波市", 3302),
    ("温州市", 3303),
    ("广州市", 4401),
    ("深圳市", 4403),
    ("成都市", 5101),
];

const BUILTIN_COUNTIES: &[(&str, u32)] = &[
    ("东城区", 110101),
    ("西城区", 110102),
    ("朝阳区", 110105),
    ("海淀区", 110108),
    ("和平区", 120101),
    ("长安区", 130102),
    ("路南区", 130202),
    ("南关区", 220102),
    ("朝阳区", 220104),
    ("黄浦区", 310101),
    ("浦东新区", 310115),
    ("玄武区", 320102),
    ("秦淮区", 320104),
    ("锡山区", 320205),
    ("姑苏区", 320508),
    ("吴江区", 320509),
    ("昆山市", 320583),
    ("上城区", 330102),
    ("西湖区", 330106),
    ("余杭区", 330110),
    ("富阳区", 330111),
    ("海曙区", 330203),
    ("鹿城区", 330302),
    ("越秀区", 440104),
    ("天河区", 440106),
    ("福田区", 440304),
    ("南山区", 440305),
    ("锦江区", 510104),
    ("武侯区", 510107),
];

/// County-level names retired by later redistricting.
const BUILTIN_COUNTIES_LEGACY: &[(&str, u32)] = &[
    ("崇文区", 110103),
    ("宣武区", 110104),
    ("闸北区", 310108),
    ("平江区", 320503),
    ("沧浪区", 320504),
    ("金阊区", 320505),
    ("吴江市", 320584),
    ("富阳市", 330183),
];

/// Small embedded dictionary covering a few provinces, for offline use.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl DictionaryProvider for BuiltinProvider {
    fn load(&self) -> Result<DictionaryTables> {
        Ok(DictionaryTables {
            provinces: to_entries(BUILTIN_PROVINCES),
            cities: to_entries(BUILTIN_CITIES),
            counties: to_entries(BUILTIN_COUNTIES),
            counties_legacy: to_entries(BUILTIN_COUNTIES_LEGACY),
        })
    }

    fn describe(&self) -> String {
        "built-in sample dataset".to_string()
    }
}

fn to_entries(rows: &[(&str, u32)]) -> Vec<DictionaryEntry> {
    rows.iter()
        .map(|&(name, code)| DictionaryEntry::new(name, code))
        .collect()
}
