//! Batch driver: resolve many optional inputs, position for position.

use rayon::prelude::*;
use tracing::debug;

use super::resolver::LocationResolver;
use super::types::{AnnotatedLocation, LocationMatch};

/// Resolve every input in order. Absent inputs map to empty results.
pub fn resolve_all<S: AsRef<str>>(
    resolver: &LocationResolver<'_>,
    inputs: &[Option<S>],
) -> Vec<LocationMatch> {
    if all_absent(inputs) {
        return vec![LocationMatch::empty(); inputs.len()];
    }
    inputs
        .iter()
        .map(|input| resolve_one(resolver, input.as_ref().map(|s| s.as_ref())))
        .collect()
}

/// Same contract as [`resolve_all`], spread over the rayon thread pool.
pub fn resolve_all_parallel<S: AsRef<str> + Sync>(
    resolver: &LocationResolver<'_>,
    inputs: &[Option<S>],
) -> Vec<LocationMatch> {
    if all_absent(inputs) {
        return vec![LocationMatch::empty(); inputs.len()];
    }
    // Indexed parallel iterators collect in input order.
    inputs
        .par_iter()
        .map(|input| resolve_one(resolver, input.as_ref().map(|s| s.as_ref())))
        .collect()
}

/// Resolve and pair each result with the input that produced it.
pub fn annotate<S: AsRef<str> + Sync>(
    resolver: &LocationResolver<'_>,
    inputs: &[Option<S>],
    parallel: bool,
) -> Vec<AnnotatedLocation> {
    let resolved = if parallel {
        resolve_all_parallel(resolver, inputs)
    } else {
        resolve_all(resolver, inputs)
    };
    let matched = resolved.iter().filter(|m| !m.is_empty()).count();
    debug!(total = inputs.len(), matched, parallel, "batch resolved");

    inputs
        .iter()
        .zip(resolved)
        .map(|(input, resolved)| AnnotatedLocation {
            location: input.as_ref().map(|s| s.as_ref().to_string()),
            resolved,
        })
        .collect()
}

fn resolve_one(resolver: &LocationResolver<'_>, input: Option<&str>) -> LocationMatch {
    match input {
        Some(s) => resolver.resolve(s),
        None => LocationMatch::empty(),
    }
}

fn all_absent<S>(inputs: &[Option<S>]) -> bool {
    let absent = inputs.iter().all(Option::is_none);
    if absent {
        debug!(total = inputs.len(), "all inputs absent, skipping dictionary scan");
    }
    absent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::dictionary::DictionaryStore;
    use crate::location::types::{DictionaryEntry as E, DictionaryTables};

    fn fixture() -> DictionaryStore {
        DictionaryStore::new(DictionaryTables {
            provinces: vec![E::new("浙江省", 33), E::new("江苏省", 32)],
            cities: vec![E::new("杭州市", 3301), E::new("苏州市", 3205)],
            counties: vec![E::new("西湖区", 330106), E::new("昆山市", 320583)],
            counties_legacy: vec![],
        })
    }

    #[test]
    fn test_all_absent_batch() {
        let store = DictionaryStore::default();
        let resolver = LocationResolver::new(&store);
        let inputs: Vec<Option<&str>> = vec![None; 4];

        let out = resolve_all(&resolver, &inputs);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(LocationMatch::is_empty));

        let out = resolve_all_parallel(&resolver, &inputs);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(LocationMatch::is_empty));
    }

    #[test]
    fn test_empty_batch() {
        let store = fixture();
        let resolver = LocationResolver::new(&store);
        let inputs: Vec<Option<String>> = Vec::new();
        assert!(resolve_all(&resolver, &inputs).is_empty());
    }

    #[test]
    fn test_order_preserved_with_absent() {
        let store = fixture();
        let resolver = LocationResolver::new(&store);
        let inputs = vec![Some("浙江省杭州市西湖区"), None, Some("昆山市")];

        let out = resolve_all(&resolver, &inputs);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], resolver.resolve("浙江省杭州市西湖区"));
        assert!(out[1].is_empty());
        assert_eq!(out[2], resolver.resolve("昆山市"));
        assert_eq!(out[2].city.as_deref(), Some("苏州市"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let store = fixture();
        let resolver = LocationResolver::new(&store);
        let inputs: Vec<Option<String>> = (0..200)
            .map(|i| match i % 4 {
                0 => Some("浙江省杭州市".to_string()),
                1 => None,
                2 => Some("昆山市花桥镇".to_string()),
                _ => Some(format!("无名路{}号", i)),
            })
            .collect();

        assert_eq!(
            resolve_all(&resolver, &inputs),
            resolve_all_parallel(&resolver, &inputs)
        );
    }

    #[test]
    fn test_annotate_echoes_input() {
        let store = fixture();
        let resolver = LocationResolver::new(&store);
        let inputs = vec![Some("江苏省".to_string()), None];

        let rows = annotate(&resolver, &inputs, false);
        assert_eq!(rows[0].location.as_deref(), Some("江苏省"));
        assert_eq!(rows[0].resolved.province_code, Some(32));
        assert!(rows[1].location.is_none());
        assert!(rows[1].resolved.is_empty());
    }
}
