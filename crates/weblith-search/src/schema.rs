//! Index schema definition.
//!
//! This module defines the field names of the searchable document layout.
//! The schema is a plain immutable value: it is built once at startup and
//! injected into the [`DocumentAssembler`](crate::DocumentAssembler) and
//! [`QueryTranslator`](crate::QueryTranslator) rather than accessed through
//! a global.
//!
//! # Schema Fields
//!
//! ## Identity Fields
//! - `id`: Resource identifier
//! - `version` / `alternate_version`: Version number, and the flag that
//!   distinguishes the preferred rendition from other stored snapshots
//! - `path` / `path_prefix`: Resource path and its prefix decomposition
//! - `type`: Resource type tag
//!
//! ## Editorial Fields
//! - `subject`, `series`, `template`, `stationary`
//! - `created` / `created_by`, `modified` / `modified_by`,
//!   `published_by` / `published_from`, `locked_by`
//!
//! ## Composition Fields
//! - `pagelet_type` (plus composer-scoped and position-scoped variants)
//! - `pagelet_properties`: Flattened `key=value` pagelet properties
//!
//! ## Content Fields
//! - `filename`, `source`, `external_location`, `mimetype`
//!
//! ## Full-Text Fields
//! - `fulltext`: Language-neutral free-text aggregation
//! - `fulltext_<lang>`: One aggregation per content language

use weblith_core::Language;

/// Schema version for mapping migrations.
///
/// Increment this when schema fields change to force index rebuilds.
pub const SCHEMA_VERSION: u32 = 2;

/// Immutable registry of index field names.
///
/// Plain field names are static; per-language and per-placement field names
/// are produced by the template methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    /// Resource identifier.
    pub id: &'static str,
    /// Resource version.
    pub version: &'static str,
    /// Flag marking non-preferred renditions of a resource.
    pub alternate_version: &'static str,
    /// Resource path.
    pub path: &'static str,
    /// Resource path prefix.
    pub path_prefix: &'static str,
    /// Resource type tag.
    pub resource_type: &'static str,
    /// Editorial subjects (tags).
    pub subject: &'static str,
    /// Editorial series.
    pub series: &'static str,
    /// Page template.
    pub template: &'static str,
    /// Stationary flag.
    pub stationary: &'static str,
    /// Creation date.
    pub created: &'static str,
    /// Creating user.
    pub created_by: &'static str,
    /// Modification date.
    pub modified: &'static str,
    /// Modifying user.
    pub modified_by: &'static str,
    /// Publishing user.
    pub published_by: &'static str,
    /// Publication start date.
    pub published_from: &'static str,
    /// User holding the editing lock.
    pub locked_by: &'static str,
    /// Flattened pagelet properties (`key=value`).
    pub pagelet_properties: &'static str,
    /// Pagelet type (`module/id`), regardless of placement.
    pub pagelet_type: &'static str,
    /// Content filename.
    pub filename: &'static str,
    /// Content source.
    pub source: &'static str,
    /// External content location.
    pub external_location: &'static str,
    /// Content mimetype.
    pub mimetype: &'static str,
    /// Language-neutral fulltext aggregation.
    pub fulltext: &'static str,
}

impl IndexSchema {
    /// Build the index schema.
    pub fn build() -> Self {
        Self {
            id: "id",
            version: "version",
            alternate_version: "alternate_version",
            path: "path",
            path_prefix: "path_prefix",
            resource_type: "type",
            subject: "subject",
            series: "series",
            template: "template",
            stationary: "stationary",
            created: "created",
            created_by: "created_by",
            modified: "modified",
            modified_by: "modified_by",
            published_by: "published_by",
            published_from: "published_from",
            locked_by: "locked_by",
            pagelet_properties: "pagelet_properties",
            pagelet_type: "pagelet_type",
            filename: "filename",
            source: "source",
            external_location: "external_location",
            mimetype: "mimetype",
            fulltext: "fulltext",
        }
    }

    /// Fulltext field name for a content language.
    pub fn localized_fulltext(&self, language: &Language) -> String {
        format!("{}_{}", self.fulltext, language.identifier())
    }

    /// Pagelet-type field name scoped to a composer.
    pub fn pagelet_type_in_composer(&self, composer: &str) -> String {
        format!("{}_composer_{}", self.pagelet_type, composer)
    }

    /// Pagelet-type field name scoped to a position within a composer.
    pub fn pagelet_type_at_position(&self, position: u32) -> String {
        format!("{}_position_{}", self.pagelet_type, position)
    }

    /// All plain (non-templated) field names.
    pub fn all_fields(&self) -> Vec<&'static str> {
        vec![
            self.id,
            self.version,
            self.alternate_version,
            self.path,
            self.path_prefix,
            self.resource_type,
            self.subject,
            self.series,
            self.template,
            self.stationary,
            self.created,
            self.created_by,
            self.modified,
            self.modified_by,
            self.published_by,
            self.published_from,
            self.locked_by,
            self.pagelet_properties,
            self.pagelet_type,
            self.filename,
            self.source,
            self.external_location,
            self.mimetype,
            self.fulltext,
        ]
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::build()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_build() {
        let schema = IndexSchema::build();
        assert_eq!(schema.all_fields().len(), 24);
    }

    #[test]
    fn test_field_names_unique() {
        let schema = IndexSchema::build();
        let fields = schema.all_fields();
        let unique: std::collections::HashSet<_> = fields.iter().collect();
        assert_eq!(unique.len(), fields.len());
    }

    #[test]
    fn test_localized_fulltext() {
        let schema = IndexSchema::build();
        assert_eq!(schema.localized_fulltext(&Language::new("de")), "fulltext_de");
    }

    #[test]
    fn test_pagelet_type_variants() {
        let schema = IndexSchema::build();
        assert_eq!(
            schema.pagelet_type_in_composer("main"),
            "pagelet_type_composer_main"
        );
        assert_eq!(
            schema.pagelet_type_at_position(3),
            "pagelet_type_position_3"
        );
    }

    #[test]
    fn test_default_matches_build() {
        assert_eq!(IndexSchema::default(), IndexSchema::build());
    }
}
