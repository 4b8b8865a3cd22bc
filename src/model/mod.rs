//! File catalog record types

use serde::{Deserialize, Serialize};

/// One file record as stored in the backend index.
///
/// Instances flow through the search pipeline read-only. The `id` field is
/// excluded from keyword search by the schema registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub meta: FileMeta,
}

impl FileDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: String::new(),
            content_type: String::new(),
            meta: FileMeta::default(),
        }
    }
}

/// Embedded metadata record, searchable under the `meta.` prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}
