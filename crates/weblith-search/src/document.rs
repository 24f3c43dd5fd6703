//! Searchable document representation and assembly.
//!
//! The [`DocumentAssembler`] flattens a resource identity plus the ordered
//! metadata entry sequence produced by a
//! [`MetadataExtractor`](crate::MetadataExtractor) into a
//! [`SearchableDocument`], the value object handed to the index gateway's
//! upsert operation.
//!
//! Assembly is a pure, deterministic transform: the same identity and entry
//! sequence always produce the same document. It is not incremental — a
//! document is assembled in one pass per resource snapshot and then
//! discarded.
//!
//! # Fulltext Aggregation
//!
//! Entries flagged for fulltext participation additionally feed free-text
//! accumulators: one language-neutral, one per content language. Each
//! accumulator is the space-joined, trimmed, order-preserving concatenation
//! of every contributing value, in entry-then-value order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use weblith_core::{Error, Language, ResourceIdentity, Result};

use crate::metadata::MetadataEntry;
use crate::schema::IndexSchema;

/// A flat document ready for indexing.
///
/// Field writes append rather than overwrite: a field written twice holds
/// two values (the backing index treats this as a multi-valued field). Site,
/// identifier, and type are derived from the identity, not stored as
/// ordinary fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableDocument {
    identity: ResourceIdentity,
    fields: BTreeMap<String, Vec<Value>>,
}

impl SearchableDocument {
    fn new(identity: ResourceIdentity) -> Self {
        Self {
            identity,
            fields: BTreeMap::new(),
        }
    }

    /// The identity of the resource snapshot this document represents.
    pub fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    /// The site this document belongs to (derived from the identity).
    pub fn site(&self) -> &str {
        self.identity.site()
    }

    /// The resource identifier (derived from the identity).
    pub fn identifier(&self) -> &str {
        self.identity.identifier()
    }

    /// The resource type (derived from the identity).
    pub fn resource_type(&self) -> &str {
        self.identity.resource_type()
    }

    /// All fields with their values, ordered by field name.
    pub fn fields(&self) -> &BTreeMap<String, Vec<Value>> {
        &self.fields
    }

    /// The values recorded under a field, if any.
    pub fn values(&self, field: &str) -> Option<&[Value]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    fn add_value(&mut self, field: &str, value: Value) {
        self.fields.entry(field.to_string()).or_default().push(value);
    }
}

/// Assembles searchable documents from resource identities and metadata.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    schema: IndexSchema,
}

impl DocumentAssembler {
    /// Create an assembler for the given schema.
    pub fn new(schema: IndexSchema) -> Self {
        Self { schema }
    }

    /// The schema this assembler writes against.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Flatten an identity and its metadata entries into a document.
    ///
    /// Entries with no values contribute nothing. Entry order is preserved
    /// in multi-valued fields and in the fulltext aggregations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Contract`] if an entry carries a blank name.
    pub fn assemble(
        &self,
        identity: &ResourceIdentity,
        entries: &[MetadataEntry],
    ) -> Result<SearchableDocument> {
        let mut document = SearchableDocument::new(identity.clone());
        let mut fulltext = String::new();
        let mut localized_fulltext: BTreeMap<Language, String> = BTreeMap::new();

        for entry in entries {
            if entry.name().trim().is_empty() {
                return Err(Error::contract("metadata entry name must not be blank"));
            }

            for value in entry.values() {
                document.add_value(entry.name(), value.clone());
                if entry.add_to_fulltext() {
                    append_value(&mut fulltext, value);
                }
            }

            for (language, values) in entry.localized_values() {
                for value in values {
                    document.add_value(entry.name(), value.clone());
                    if entry.add_to_fulltext() {
                        let accumulator =
                            localized_fulltext.entry(language.clone()).or_default();
                        append_value(accumulator, value);
                    }
                }
            }
        }

        if !fulltext.is_empty() {
            document.add_value(self.schema.fulltext, Value::String(fulltext));
        }
        for (language, text) in localized_fulltext {
            if !text.is_empty() {
                document.add_value(
                    &self.schema.localized_fulltext(&language),
                    Value::String(text),
                );
            }
        }

        log::debug!(
            "assembled document for {}:{} with {} fields",
            document.site(),
            document.identifier(),
            document.fields().len()
        );

        Ok(document)
    }
}

/// Append the string form of a value to a fulltext accumulator.
///
/// Arrays contribute element-wise in order; strings are trimmed; nulls and
/// blank strings contribute nothing. Contributions are joined by a single
/// space.
fn append_value(accumulator: &mut String, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                append_value(accumulator, item);
            }
        }
        Value::String(text) => append_text(accumulator, text),
        Value::Null => {}
        other => append_text(accumulator, &other.to_string()),
    }
}

fn append_text(accumulator: &mut String, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if !accumulator.is_empty() {
        accumulator.push(' ');
    }
    accumulator.push_str(trimmed);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use weblith_core::LIVE_VERSION;

    fn sample_identity() -> ResourceIdentity {
        ResourceIdentity::new("main", "4bb19980", "/news/article", LIVE_VERSION, "page")
    }

    fn assembler() -> DocumentAssembler {
        DocumentAssembler::new(IndexSchema::build())
    }

    fn entry(name: &str, values: &[&str], fulltext: bool) -> MetadataEntry {
        let mut entry = MetadataEntry::new(name).unwrap();
        if fulltext {
            entry = entry.with_fulltext();
        }
        for value in values {
            entry.add_value(*value);
        }
        entry
    }

    // ------------------------------------------------------------------------
    // Field recording
    // ------------------------------------------------------------------------

    #[test]
    fn test_multi_valued_fields_append() {
        let entries = vec![entry("subject", &["news", "sports"], false)];
        let doc = assembler().assemble(&sample_identity(), &entries).unwrap();

        assert_eq!(
            doc.values("subject").unwrap(),
            &[json!("news"), json!("sports")]
        );
    }

    #[test]
    fn test_empty_entry_contributes_nothing() {
        let entries = vec![MetadataEntry::new("subject").unwrap()];
        let doc = assembler().assemble(&sample_identity(), &entries).unwrap();
        assert!(doc.fields().is_empty());
    }

    #[test]
    fn test_identity_exposed_as_accessors() {
        let doc = assembler().assemble(&sample_identity(), &[]).unwrap();
        assert_eq!(doc.site(), "main");
        assert_eq!(doc.identifier(), "4bb19980");
        assert_eq!(doc.resource_type(), "page");
        // Identity is not materialized as ordinary fields.
        assert!(doc.values("id").is_none());
        assert!(doc.values("type").is_none());
    }

    // ------------------------------------------------------------------------
    // Fulltext aggregation
    // ------------------------------------------------------------------------

    #[test]
    fn test_fulltext_entry_then_value_order() {
        // Scenario: title then subjects, all fulltext-eligible.
        let entries = vec![
            entry("title", &["Hello"], true),
            entry("subject", &["news", "sports"], true),
        ];
        let doc = assembler().assemble(&sample_identity(), &entries).unwrap();

        assert_eq!(
            doc.values("fulltext").unwrap(),
            &[json!("Hello news sports")]
        );
    }

    #[test]
    fn test_fulltext_trims_contributions() {
        let entries = vec![entry("title", &["  Hello  ", "   "], true)];
        let doc = assembler().assemble(&sample_identity(), &entries).unwrap();
        assert_eq!(doc.values("fulltext").unwrap(), &[json!("Hello")]);
    }

    #[test]
    fn test_fulltext_flattens_sequences() {
        let mut entry = MetadataEntry::new("keywords").unwrap().with_fulltext();
        entry.add_value(json!(["red", "blue"]));
        let doc = assembler().assemble(&sample_identity(), &[entry]).unwrap();

        assert_eq!(doc.values("fulltext").unwrap(), &[json!("red blue")]);
    }

    #[test]
    fn test_fulltext_excludes_unflagged_entries() {
        let entries = vec![
            entry("title", &["Hello"], true),
            entry("template", &["default"], false),
        ];
        let doc = assembler().assemble(&sample_identity(), &entries).unwrap();
        assert_eq!(doc.values("fulltext").unwrap(), &[json!("Hello")]);
    }

    #[test]
    fn test_localized_fulltext_isolated_per_language() {
        let mut title = MetadataEntry::new("title").unwrap().with_fulltext();
        title.add_localized_value("de".into(), "Hallo");
        title.add_localized_value("fr".into(), "Bonjour");

        let doc = assembler().assemble(&sample_identity(), &[title]).unwrap();

        assert_eq!(doc.values("fulltext_de").unwrap(), &[json!("Hallo")]);
        assert_eq!(doc.values("fulltext_fr").unwrap(), &[json!("Bonjour")]);
        assert!(doc.values("fulltext").is_none());
    }

    #[test]
    fn test_localized_values_recorded_under_entry_name() {
        let mut title = MetadataEntry::new("title").unwrap();
        title.add_value("Hello");
        title.add_localized_value("de".into(), "Hallo");

        let doc = assembler().assemble(&sample_identity(), &[title]).unwrap();
        assert_eq!(
            doc.values("title").unwrap(),
            &[json!("Hello"), json!("Hallo")]
        );
    }

    #[test]
    fn test_non_string_values_use_string_form() {
        let mut entry = MetadataEntry::new("position").unwrap().with_fulltext();
        entry.add_value(42);
        entry.add_value(true);
        let doc = assembler().assemble(&sample_identity(), &[entry]).unwrap();

        assert_eq!(doc.values("fulltext").unwrap(), &[json!("42 true")]);
    }

    // ------------------------------------------------------------------------
    // Determinism and contract violations
    // ------------------------------------------------------------------------

    #[test]
    fn test_assembly_idempotent() {
        let entries = vec![
            entry("title", &["Hello"], true),
            entry("subject", &["news"], true),
        ];
        let first = assembler().assemble(&sample_identity(), &entries).unwrap();
        let second = assembler().assemble(&sample_identity(), &entries).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_entry_name_fails_fast() {
        // A blank name can only arrive through deserialized entries; the
        // constructor rejects it. Simulate the round trip.
        let json = r#"{"name":"  ","values":["x"],"localized":{},"add_to_fulltext":false}"#;
        let entry: MetadataEntry = serde_json::from_str(json).unwrap();

        let result = assembler().assemble(&sample_identity(), &[entry]);
        assert!(matches!(result, Err(Error::Contract(_))));
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    proptest! {
        /// The fulltext field equals the space-joined, trimmed concatenation
        /// of every contributing value, in entry-then-value order.
        #[test]
        fn prop_fulltext_is_ordered_join(
            values in proptest::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let mut entry = MetadataEntry::new("words").unwrap().with_fulltext();
            for value in &values {
                entry.add_value(value.as_str());
            }

            let doc = assembler().assemble(&sample_identity(), &[entry]).unwrap();

            // Duplicates are suppressed at entry level, order preserved.
            let mut seen = Vec::new();
            for value in &values {
                if !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
            prop_assert_eq!(
                doc.values("fulltext").unwrap(),
                &[json!(seen.join(" "))]
            );
        }
    }
}
