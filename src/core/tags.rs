//! Tag-Mappings (key → value) für Nodes und Ways.

use indexmap::IndexMap;

/// Tags eines OSM-Primitivs; Reihenfolge wie beim Import.
pub type Tags = IndexMap<String, String>;

/// Tag-Änderungen: `Some(value)` setzt, `None` entfernt den Key.
pub type TagChanges = IndexMap<String, Option<String>>;

/// Wendet Tag-Änderungen auf ein Tag-Mapping an.
pub fn apply_tag_changes(tags: &mut Tags, changes: &TagChanges) {
    for (key, value) in changes {
        match value {
            Some(value) => {
                tags.insert(key.clone(), value.clone());
            }
            None => {
                tags.shift_remove(key);
            }
        }
    }
}

/// Baut ein Tag-Mapping aus Key/Value-Paaren (v.a. für Tests und Fixtures).
pub fn tags_from<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Tags {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
