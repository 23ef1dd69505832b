//! Manifest translation for compiled packs.
//!
//! Bridges the two metadata dialects a pack can carry: a `pack.mcmeta`
//! description (JSON, with YAML accepted as a fallback) and an addon
//! `manifest.json`. Translation reads whatever metadata exists in the
//! store, layers it over generated defaults, derives the minimum engine
//! version from the declared pack format, and writes the resulting
//! manifest back through the store.
//!
//! Malformed metadata never aborts a compilation pass. Parse failures
//! are logged and the defaults stand in for the unreadable file.

use std::path::Path;

use packscript_core::{ArtifactStore, StoreError};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Errors raised while encoding or persisting a manifest.
///
/// Unreadable *input* metadata is deliberately absent here: those
/// failures are absorbed with a log line so a broken `pack.mcmeta`
/// cannot take down the whole pass.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The translated manifest could not be written to the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The translated manifest could not be serialized.
    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Known pack formats and the game version range each one spans.
///
/// The derived minimum engine version is the upper bound of the range,
/// padded to three components.
const PACK_FORMAT_VERSIONS: &[(&str, &str)] = &[
    ("4", "1.13–1.14.4"),
    ("5", "1.15–1.16.1"),
    ("6", "1.16.2–1.16.5"),
    ("7", "1.17–1.17.1"),
    ("8", "1.18–1.18.1"),
    ("9", "1.18.2"),
    ("10", "1.19–1.19.3"),
    ("12", "1.19.4"),
    ("15", "1.20"),
];

/// Translates pack metadata into an addon manifest.
///
/// Reads `meta_path` (JSON first, YAML as a fallback) and any existing
/// manifest at `manifest_path`, merges both over generated defaults,
/// then writes the tab-indented manifest back to `manifest_path`.
/// Returns the final manifest document.
///
/// Merging is shallow: a top-level key in the parsed file replaces the
/// default wholesale. Two header fields are then re-derived from the
/// merged metadata regardless: `description` is copied from
/// `pack.description` when present, and `min_engine_version` is looked
/// up from `pack.pack_format` when the format is known.
pub fn translate<S: ArtifactStore>(
    store: &mut S,
    meta_path: &Path,
    manifest_path: &Path,
) -> Result<Value, ManifestError> {
    let mut meta = json!({
        "pack": {
            "pack_format": 15,
            "description": "A generated datapack",
        },
    });
    let mut manifest = json!({
        "format_version": 2,
        "header": {
            "name": pack_name(meta_path),
            "description": "A generated addon",
            "uuid": Uuid::new_v4().to_string(),
            "version": [1, 0, 0],
            "min_engine_version": [1, 16, 0],
        },
        "metadata": {
            "generated_with": {
                "packscript": [env!("CARGO_PKG_VERSION")],
            },
        },
    });

    if let Some(text) = store.contents(meta_path) {
        match parse_metadata(&text) {
            Ok(parsed) => shallow_merge(&mut meta, parsed),
            Err((json_error, yaml_error)) => {
                error!(
                    path = %meta_path.display(),
                    %json_error,
                    %yaml_error,
                    "parsing pack metadata failed"
                );
            }
        }
    }
    if let Some(text) = store.contents(manifest_path) {
        match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => shallow_merge(&mut manifest, parsed),
            Err(parse_error) => {
                error!(
                    path = %manifest_path.display(),
                    %parse_error,
                    "parsing manifest failed"
                );
            }
        }
    }

    let pack = meta.get("pack");
    let description = pack.and_then(|pack| pack.get("description")).cloned();
    let engine_version = pack
        .and_then(|pack| pack.get("pack_format"))
        .and_then(min_engine_version);
    if let Some(header) = manifest.get_mut("header").and_then(Value::as_object_mut) {
        if let Some(description) = description {
            header.insert("description".to_string(), description);
        }
        if let Some(engine_version) = engine_version {
            header.insert("min_engine_version".to_string(), json!(engine_version));
        }
    }

    info!(path = %manifest_path.display(), "saving manifest");
    store.set_contents(manifest_path, &encode(&manifest)?)?;
    Ok(manifest)
}

/// Default manifest name: the directory holding the pack metadata.
fn pack_name(meta_path: &Path) -> String {
    meta_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "my addon name".to_string())
}

/// Parses pack metadata as JSON, falling back to YAML.
///
/// Returns both parser errors when neither dialect accepts the text.
fn parse_metadata(text: &str) -> Result<Value, (serde_json::Error, serde_yaml::Error)> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_error) => match serde_yaml::from_str(text) {
            Ok(value) => Ok(value),
            Err(yaml_error) => Err((json_error, yaml_error)),
        },
    }
}

/// Replaces top-level keys of `base` with those of `patch`.
///
/// Non-object patches are ignored; a scalar `pack.mcmeta` has nothing
/// to merge.
fn shallow_merge(base: &mut Value, patch: Value) {
    let Value::Object(patch) = patch else {
        return;
    };
    let Some(base) = base.as_object_mut() else {
        return;
    };
    for (key, value) in patch {
        base.insert(key, value);
    }
}

/// Derives a three-component minimum engine version from a pack format.
///
/// The format may be declared as a number or a string; both forms match
/// the same table row. Unknown formats yield `None` and the manifest
/// keeps whatever version it already carries.
fn min_engine_version(pack_format: &Value) -> Option<Vec<u64>> {
    let token = match pack_format {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => return None,
    };
    let range = PACK_FORMAT_VERSIONS
        .iter()
        .find(|(format, _)| *format == token)?
        .1;
    let upper = range.split('–').next_back()?;
    let mut version = Vec::new();
    for piece in upper.split('.') {
        version.push(piece.parse().ok()?);
    }
    while version.len() < 3 {
        version.push(0);
    }
    Some(version)
}

/// Serializes a manifest with tab indentation.
fn encode(manifest: &Value) -> Result<String, ManifestError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use packscript_core::{ArtifactStore, MemStore};
    use serde_json::{Value, json};

    use super::translate;

    fn meta_path() -> PathBuf {
        PathBuf::from("demo_pack/pack.mcmeta")
    }

    fn manifest_path() -> PathBuf {
        PathBuf::from("demo_pack/manifest.json")
    }

    fn translate_with(store: &mut MemStore) -> Value {
        translate(store, &meta_path(), &manifest_path())
            .expect("translation should succeed")
    }

    #[test]
    fn defaults_when_no_metadata_exists() {
        let mut store = MemStore::new();
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["format_version"], json!(2));
        assert_eq!(manifest["header"]["name"], json!("demo_pack"));
        assert_eq!(manifest["header"]["description"], json!("A generated datapack"));
        assert_eq!(manifest["header"]["version"], json!([1, 0, 0]));
        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 20, 0]));
        let uuid = manifest["header"]["uuid"]
            .as_str()
            .expect("uuid should be a string");
        assert_eq!(uuid.len(), 36);
        assert!(manifest["metadata"]["generated_with"]["packscript"].is_array());
    }

    #[test]
    fn pack_name_falls_back_without_parent_directory() {
        let mut store = MemStore::new();
        let manifest = translate(
            &mut store,
            Path::new("pack.mcmeta"),
            Path::new("manifest.json"),
        )
        .expect("translation should succeed");

        assert_eq!(manifest["header"]["name"], json!("my addon name"));
    }

    #[test]
    fn engine_version_derived_from_numeric_pack_format() {
        let mut store = MemStore::new();
        store.preload(meta_path(), r#"{"pack": {"pack_format": 9}}"#);
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 18, 2]));
    }

    #[test]
    fn engine_version_matches_string_pack_format() {
        let mut store = MemStore::new();
        store.preload(meta_path(), r#"{"pack": {"pack_format": "12"}}"#);
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 19, 4]));
    }

    #[test]
    fn engine_version_uses_upper_bound_of_range() {
        let mut store = MemStore::new();
        store.preload(meta_path(), r#"{"pack": {"pack_format": 4}}"#);
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 14, 4]));
    }

    #[test]
    fn unknown_pack_format_keeps_existing_engine_version() {
        let mut store = MemStore::new();
        store.preload(meta_path(), r#"{"pack": {"pack_format": 99}}"#);
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 16, 0]));
    }

    #[test]
    fn description_copied_from_pack_metadata() {
        let mut store = MemStore::new();
        store.preload(
            meta_path(),
            r#"{"pack": {"pack_format": 15, "description": "glass gardens"}}"#,
        );
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["description"], json!("glass gardens"));
    }

    #[test]
    fn yaml_metadata_accepted_as_fallback() {
        let mut store = MemStore::new();
        store.preload(meta_path(), "pack:\n  pack_format: 8\n");
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 18, 1]));
    }

    #[test]
    fn unparseable_metadata_falls_back_to_defaults() {
        let mut store = MemStore::new();
        store.preload(meta_path(), "{ this is neither json");
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["description"], json!("A generated datapack"));
        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 20, 0]));
    }

    #[test]
    fn scalar_metadata_is_ignored() {
        let mut store = MemStore::new();
        store.preload(meta_path(), "5");
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 20, 0]));
    }

    #[test]
    fn existing_manifest_replaces_defaults_wholesale() {
        let mut store = MemStore::new();
        store.preload(
            manifest_path(),
            r#"{"format_version": 3, "header": {"name": "kept", "min_engine_version": [2, 0, 0]}}"#,
        );
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["format_version"], json!(3));
        assert_eq!(manifest["header"]["name"], json!("kept"));
        assert_eq!(manifest["header"]["min_engine_version"], json!([1, 20, 0]));
        assert_eq!(manifest["header"].get("uuid"), None);
    }

    #[test]
    fn invalid_manifest_json_is_absorbed() {
        let mut store = MemStore::new();
        store.preload(manifest_path(), "not even close {");
        let manifest = translate_with(&mut store);

        assert_eq!(manifest["format_version"], json!(2));
    }

    #[test]
    fn written_manifest_is_tab_indented() {
        let mut store = MemStore::new();
        translate_with(&mut store);

        let text = store
            .contents(&manifest_path())
            .expect("manifest should be written");
        assert!(text.starts_with("{\n\t\"format_version\": 2"));
        let reparsed: Value = serde_json::from_str(&text).expect("output should be valid JSON");
        assert_eq!(reparsed["header"]["name"], json!("demo_pack"));
    }
}
