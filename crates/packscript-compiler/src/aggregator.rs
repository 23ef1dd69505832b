//! Source-scoped aggregation of values into shared artifacts.
//!
//! Several input sources contribute entries to one logical output (a hook
//! file, a tag document). The aggregator keys contributions by source so one
//! source can be recompiled: resetting a source drops that source's segment
//! and leaves every other segment untouched.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use packscript_core::{ArtifactStore, StoreError};

/// Ordered, source-keyed collection of contributed values.
///
/// Segments keep insertion order, as do the values within a segment, so
/// flattened output is stable across runs that feed sources in the same
/// order.
#[derive(Debug, Clone)]
pub struct Aggregator<V> {
    segments: IndexMap<String, Vec<V>>,
}

impl<V> Aggregator<V> {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self {
            segments: IndexMap::new(),
        }
    }

    /// Append a value to a source's segment, creating the segment on first
    /// use.
    pub fn set(&mut self, source: impl Into<String>, value: V) {
        self.segments.entry(source.into()).or_default().push(value);
    }

    /// Drop a source's segment. Other segments keep their order.
    pub fn reset(&mut self, source: &str) {
        self.segments.shift_remove(source);
    }

    /// All values flattened across segments in insertion order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.segments.values().flatten().cloned().collect()
    }

    /// The values a single source contributed.
    pub fn values_for(&self, source: &str) -> Vec<V>
    where
        V: Clone,
    {
        self.segments.get(source).cloned().unwrap_or_default()
    }

    /// Iterate over all values in insertion order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.segments.values().flatten()
    }

    /// Iterate over contributing sources in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    /// Total number of values across all segments.
    pub fn len(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    /// Check whether no segment holds any value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for Aggregator<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tag documents
// ============================================================================

/// Aggregator bound to a JSON tag document artifact.
///
/// Every mutation rewrites the backing artifact immediately, so the document
/// on disk always reflects the current segments. The artifact is confirmed
/// lazily on the first contribution and re-confirmed after a reset, keeping
/// it present even when a reset empties it.
#[derive(Debug, Clone)]
pub struct TagAggregator {
    segments: Aggregator<serde_json::Value>,
    path: PathBuf,
    current: bool,
}

impl TagAggregator {
    /// Create a tag aggregator writing to the given artifact path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            segments: Aggregator::new(),
            path: path.into(),
            current: false,
        }
    }

    /// The backing artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The flattened tag values in document order.
    pub fn values(&self) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        for value in self.segments.iter() {
            flatten_into(&mut out, value.clone());
        }
        out
    }

    /// Check whether the document holds no values.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a source's value and rewrite the document.
    pub fn set<S: ArtifactStore>(
        &mut self,
        store: &mut S,
        source: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), StoreError> {
        if !self.current {
            store.confirm(&self.path)?;
            self.current = true;
        }
        self.segments.set(source, value);
        self.write(store)
    }

    /// Drop a source's segment, re-confirm the artifact and rewrite it.
    pub fn reset<S: ArtifactStore>(&mut self, store: &mut S, source: &str) -> Result<(), StoreError> {
        self.current = false;
        self.segments.reset(source);
        store.confirm(&self.path)?;
        self.current = true;
        self.write(store)
    }

    fn write<S: ArtifactStore>(&self, store: &mut S) -> Result<(), StoreError> {
        let doc = serde_json::json!({
            "replace": false,
            "values": self.values(),
        });
        store.set_contents(&self.path, &doc.to_string())
    }
}

/// Flatten nested arrays depth-first, mirroring how contributed lists splice
/// into the document.
fn flatten_into(out: &mut Vec<serde_json::Value>, value: serde_json::Value) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                flatten_into(out, item);
            }
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packscript_core::MemStore;
    use serde_json::json;

    #[test]
    fn values_flatten_in_insertion_order() {
        let mut agg: Aggregator<&str> = Aggregator::new();
        agg.set("a.mc", "one");
        agg.set("b.mc", "two");
        agg.set("a.mc", "three");

        assert_eq!(agg.values(), vec!["one", "three", "two"]);
        assert_eq!(agg.values_for("a.mc"), vec!["one", "three"]);
        assert_eq!(agg.values_for("missing"), Vec::<&str>::new());
    }

    #[test]
    fn reset_drops_only_the_named_source() {
        let mut agg: Aggregator<&str> = Aggregator::new();
        agg.set("a.mc", "one");
        agg.set("b.mc", "two");
        agg.reset("a.mc");

        assert_eq!(agg.values(), vec!["two"]);
        assert_eq!(agg.sources().collect::<Vec<_>>(), vec!["b.mc"]);
    }

    #[test]
    fn reset_then_set_drops_prior_contributions() {
        let mut agg: Aggregator<&str> = Aggregator::new();
        agg.set("a.mc", "one");
        agg.set("b.mc", "two");

        // Recompiling a.mc: its old values are gone, its new segment
        // re-registers after the surviving sources.
        agg.reset("a.mc");
        agg.set("a.mc", "x");

        assert_eq!(agg.values(), vec!["two", "x"]);
        assert_eq!(agg.values_for("a.mc"), vec!["x"]);
    }

    #[test]
    fn reset_of_unknown_source_is_a_no_op() {
        let mut agg: Aggregator<&str> = Aggregator::new();
        agg.set("a.mc", "one");
        agg.reset("never-seen.mc");
        assert_eq!(agg.values(), vec!["one"]);
    }

    #[test]
    fn len_counts_all_segments() {
        let mut agg: Aggregator<u32> = Aggregator::new();
        assert!(agg.is_empty());
        agg.set("a", 1);
        agg.set("a", 2);
        agg.set("b", 3);
        assert_eq!(agg.len(), 3);
    }

    #[test]
    fn tag_set_confirms_once_and_rewrites() {
        let mut store = MemStore::new();
        let mut tag = TagAggregator::new("data/tags/functions/tick.json");

        tag.set(&mut store, "a.mc", json!("demo/main")).unwrap();
        let path = Path::new("data/tags/functions/tick.json");
        assert!(store.is_confirmed(path));
        assert_eq!(
            store.written(path),
            Some(r#"{"replace":false,"values":["demo/main"]}"#)
        );

        tag.set(&mut store, "b.mc", json!("demo/other")).unwrap();
        assert_eq!(
            store.written(path),
            Some(r#"{"replace":false,"values":["demo/main","demo/other"]}"#)
        );
    }

    #[test]
    fn tag_reset_rewrites_without_the_source() {
        let mut store = MemStore::new();
        let mut tag = TagAggregator::new("tick.json");
        let path = Path::new("tick.json");

        tag.set(&mut store, "a.mc", json!("demo/main")).unwrap();
        tag.set(&mut store, "b.mc", json!("demo/other")).unwrap();
        tag.reset(&mut store, "a.mc").unwrap();

        assert_eq!(
            store.written(path),
            Some(r#"{"replace":false,"values":["demo/other"]}"#)
        );
        assert!(store.is_confirmed(path));
    }

    #[test]
    fn tag_reset_to_empty_still_writes_a_document() {
        let mut store = MemStore::new();
        let mut tag = TagAggregator::new("tick.json");
        let path = Path::new("tick.json");

        tag.set(&mut store, "a.mc", json!("demo/main")).unwrap();
        tag.reset(&mut store, "a.mc").unwrap();

        assert!(tag.is_empty());
        assert_eq!(store.written(path), Some(r#"{"replace":false,"values":[]}"#));
    }

    #[test]
    fn contributed_arrays_splice_into_the_document() {
        let mut store = MemStore::new();
        let mut tag = TagAggregator::new("tick.json");

        tag.set(&mut store, "a.mc", json!(["demo/one", ["demo/two"]]))
            .unwrap();
        assert_eq!(
            store.written(Path::new("tick.json")),
            Some(r#"{"replace":false,"values":["demo/one","demo/two"]}"#)
        );
    }
}
