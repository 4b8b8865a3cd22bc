//! Declared search schema and field discovery
//!
//! The searchable shape of the catalog document is declared once as a static
//! field registry, and the fully-qualified search field list is derived from
//! it at startup. The derived list is pure data; recomputing it is
//! idempotent, and once cached it is shared read-only across concurrent
//! search calls.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SearchError;

/// Fully-qualified search name of one field.
///
/// Top-level fields use the bare field name; fields of the embedded record
/// use `<embedded-type-name>.<field>` with the type name lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor(String);

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Dotted name for a field of the embedded record.
    pub fn embedded(type_name: &str, field: &str) -> Self {
        Self(format!("{}.{}", type_name.to_lowercase(), field))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared fields of the single embedded record type.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSchema {
    /// Type name of the embedded record (e.g. `Meta`).
    pub type_name: &'static str,
    /// Declared fields in declaration order.
    pub fields: &'static [&'static str],
}

impl EmbeddedSchema {
    /// Index-side name of the embedded slot: the type name lower-cased.
    pub fn slot_name(&self) -> String {
        self.type_name.to_lowercase()
    }
}

/// Declared fields of the searchable document type.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSchema {
    /// Identifier field, excluded from search.
    pub id_field: &'static str,
    /// Top-level declared fields in declaration order, id and embedded slot
    /// included.
    pub fields: &'static [&'static str],
    /// The one embedded record, flattened one level deep.
    pub embedded: EmbeddedSchema,
}

impl DocumentSchema {
    /// Derive the ordered searchable field list.
    ///
    /// Top-level fields in declaration order, minus the id field and the
    /// embedded slot itself, followed by the embedded fields under their
    /// dotted prefix. Deterministic for a fixed schema.
    pub fn discover_fields(&self) -> Vec<FieldDescriptor> {
        let slot = self.embedded.slot_name();

        let mut fields: Vec<FieldDescriptor> = self
            .fields
            .iter()
            .filter(|f| **f != self.id_field && **f != slot)
            .map(|f| FieldDescriptor::new(*f))
            .collect();

        fields.extend(
            self.embedded
                .fields
                .iter()
                .map(|f| FieldDescriptor::embedded(self.embedded.type_name, f)),
        );

        fields
    }

    /// A registry missing its id field or embedded slot is a configuration
    /// defect; callers treat this as fatal at startup.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.fields.contains(&self.id_field) {
            return Err(SearchError::Schema(format!(
                "declared fields are missing the id field `{}`",
                self.id_field
            )));
        }
        let slot = self.embedded.slot_name();
        if !self.fields.iter().any(|f| *f == slot) {
            return Err(SearchError::Schema(format!(
                "declared fields are missing the embedded slot `{}`",
                slot
            )));
        }
        if self.embedded.fields.is_empty() {
            return Err(SearchError::Schema(format!(
                "embedded type `{}` declares no fields",
                self.embedded.type_name
            )));
        }
        Ok(())
    }
}

/// Declared schema of [`crate::model::FileDocument`].
pub const FILE_SCHEMA: DocumentSchema = DocumentSchema {
    id_field: "id",
    fields: &["id", "name", "path", "content_type", "meta"],
    embedded: EmbeddedSchema {
        type_name: "Meta",
        fields: &["tag", "author", "description"],
    },
};

static SEARCH_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(|| FILE_SCHEMA.discover_fields());

/// Process-wide searchable field list for the file catalog.
///
/// Computed once before first use, immutable afterwards, safe for concurrent
/// reads without locking.
pub fn search_fields() -> &'static [FieldDescriptor] {
    &SEARCH_FIELDS
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SCHEMA: DocumentSchema = DocumentSchema {
        id_field: "id",
        fields: &["id", "x", "y", "meta"],
        embedded: EmbeddedSchema {
            type_name: "Meta",
            fields: &["a", "b"],
        },
    };

    #[test]
    fn discovery_excludes_id_and_embedded_slot() {
        let fields = TEST_SCHEMA.discover_fields();
        let names: Vec<&str> = fields.iter().map(FieldDescriptor::as_str).collect();
        assert_eq!(names, vec!["x", "y", "meta.a", "meta.b"]);
    }

    #[test]
    fn discovery_is_idempotent() {
        assert_eq!(TEST_SCHEMA.discover_fields(), TEST_SCHEMA.discover_fields());
    }

    #[test]
    fn embedded_prefix_is_lowercased() {
        let field = FieldDescriptor::embedded("Meta", "tag");
        assert_eq!(field.as_str(), "meta.tag");
    }

    #[test]
    fn file_schema_field_order() {
        let names: Vec<&str> = search_fields().iter().map(FieldDescriptor::as_str).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "path",
                "content_type",
                "meta.tag",
                "meta.author",
                "meta.description"
            ]
        );
    }

    #[test]
    fn file_schema_is_valid() {
        assert!(FILE_SCHEMA.validate().is_ok());
    }

    #[test]
    fn missing_embedded_slot_fails_validation() {
        let schema = DocumentSchema {
            id_field: "id",
            fields: &["id", "x"],
            embedded: EmbeddedSchema {
                type_name: "Meta",
                fields: &["a"],
            },
        };
        assert!(matches!(schema.validate(), Err(SearchError::Schema(_))));
    }

    #[test]
    fn missing_id_field_fails_validation() {
        let schema = DocumentSchema {
            id_field: "id",
            fields: &["x", "meta"],
            embedded: EmbeddedSchema {
                type_name: "Meta",
                fields: &["a"],
            },
        };
        assert!(matches!(schema.validate(), Err(SearchError::Schema(_))));
    }
}
