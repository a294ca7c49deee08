//! Runtime configuration: defaults, then environment, then CLI flags.

use std::path::PathBuf;

use crate::location::{BuiltinProvider, DictionaryProvider, JsonFileProvider};

#[derive(Clone, Debug)]
pub struct Config {
    /// JSON dictionary file; `None` selects the built-in sample dataset.
    pub dictionary_path: Option<PathBuf>,
    /// Resolve batches on the rayon pool.
    pub parallel: bool,
    pub host: String,
    pub port: u16,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: Self::default_dictionary_path().filter(|p| p.is_file()),
            parallel: false,
            host: "127.0.0.1".to_string(),
            port: 8080,
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            dictionary_path: std::env::var("GEOLOC_DICTIONARY").ok().map(PathBuf::from).or(default.dictionary_path),
            parallel: std::env::var("GEOLOC_PARALLEL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.parallel),
            host: std::env::var("GEOLOC_HOST").unwrap_or(default.host),
            port: std::env::var("GEOLOC_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port),
            verbose: std::env::var("GEOLOC_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose),
        }
    }

    /// ~/.geoloc/dictionary.json
    pub fn default_dictionary_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".geoloc").join("dictionary.json"))
    }

    /// The provider this configuration points at.
    pub fn provider(&self) -> Box<dyn DictionaryProvider + Send + Sync> {
        match &self.dictionary_path {
            Some(path) => Box::new(JsonFileProvider::new(path)),
            None => Box::new(BuiltinProvider),
        }
    }
}
