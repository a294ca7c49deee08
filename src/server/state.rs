use crate::location::{DictionaryStore, LocationResolver};

/// Shared, read-only server state.
pub struct AppState {
    pub store: DictionaryStore,
    pub parallel: bool,
}

impl AppState {
    pub fn resolver(&self) -> LocationResolver<'_> {
        LocationResolver::new(&self.store)
    }
}
