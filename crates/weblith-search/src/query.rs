//! Domain search query model.
//!
//! [`SearchQuery`] is the immutable value object describing what the caller
//! wants to find: every filter dimension is independent and optional, and
//! all set dimensions combine under logical AND. Queries are populated
//! through the typed [`SearchQueryBuilder`] — there is no runtime state
//! machine to get wrong.
//!
//! # Example
//!
//! ```rust
//! use weblith_search::SearchQuery;
//!
//! let query = SearchQuery::builder()
//!     .resource_type("page")
//!     .without_type("draft")
//!     .subject_any_of(["news", "sports"])
//!     .text("red blue")
//!     .build();
//!
//! assert_eq!(query.types(), ["page"]);
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use weblith_core::User;

/// A temporal constraint: a whole calendar day or an explicit inclusive
/// range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    /// Match any instant within the given calendar day.
    OnDay(NaiveDate),
    /// Match any instant within the inclusive range.
    Between {
        /// Range start (inclusive).
        from: DateTime<Utc>,
        /// Range end (inclusive).
        to: DateTime<Utc>,
    },
}

/// A lock-owner constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockFilter {
    /// Match resources locked by anyone at all.
    AnyUser,
    /// Match resources locked by a specific user.
    User(User),
}

/// A pagelet-type constraint, optionally scoped to a composer and/or a
/// position within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageletFilter {
    module: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    composer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<u32>,
}

impl PageletFilter {
    /// Match pagelets of the given module and identifier anywhere on a page.
    pub fn new(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            id: id.into(),
            composer: None,
            position: None,
        }
    }

    /// Restrict the match to a named composer.
    pub fn in_composer(mut self, composer: impl Into<String>) -> Self {
        self.composer = Some(composer.into());
        self
    }

    /// Restrict the match to a position within the composer.
    pub fn at_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// The pagelet's module.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The pagelet's identifier within its module.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The composer scope, if any.
    pub fn composer(&self) -> Option<&str> {
        self.composer.as_deref()
    }

    /// The position scope, if any.
    pub fn position(&self) -> Option<u32> {
        self.position
    }
}

/// A structured domain query over indexed resources.
///
/// All dimensions are independent; set dimensions combine under logical AND.
/// Built via [`SearchQuery::builder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    identifiers: Vec<String>,
    version: Option<i64>,
    preferred_version: Option<i64>,
    path: Option<String>,
    path_prefix: Option<String>,
    types: Vec<String>,
    without_types: Vec<String>,
    subjects_any: Vec<String>,
    subjects_all: Vec<String>,
    series: Vec<String>,
    template: Option<String>,
    stationary: bool,
    created_by: Option<User>,
    modified_by: Option<User>,
    published_by: Option<User>,
    created: Option<DateFilter>,
    modified: Option<DateFilter>,
    published: Option<DateFilter>,
    without_modification: bool,
    without_publication: bool,
    locked_by: Option<LockFilter>,
    elements: Vec<(String, String)>,
    properties: Vec<(String, String)>,
    pagelets: Vec<PageletFilter>,
    filename: Option<String>,
    source: Option<String>,
    external_location: Option<String>,
    mimetype: Option<String>,
    text: Option<String>,
    wildcard_search: bool,
    filter: Option<Value>,
}

impl SearchQuery {
    /// Create a new query builder.
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::default()
    }

    /// Requested resource identifiers (any of).
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Explicit version, if set.
    pub fn version(&self) -> Option<i64> {
        self.version
    }

    /// Preferred version, if set. Takes precedence over [`Self::version`].
    pub fn preferred_version(&self) -> Option<i64> {
        self.preferred_version
    }

    /// Exact path filter.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Path-prefix filter.
    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    /// Included resource types (any of).
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Excluded resource types.
    pub fn without_types(&self) -> &[String] {
        &self.without_types
    }

    /// Subjects of which at least one must match.
    pub fn subjects_any(&self) -> &[String] {
        &self.subjects_any
    }

    /// Subjects which must all match.
    pub fn subjects_all(&self) -> &[String] {
        &self.subjects_all
    }

    /// Series filters.
    pub fn series(&self) -> &[String] {
        &self.series
    }

    /// Template filter.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Whether only stationary resources are requested.
    pub fn stationary(&self) -> bool {
        self.stationary
    }

    /// Creator filter.
    pub fn created_by(&self) -> Option<&User> {
        self.created_by.as_ref()
    }

    /// Modifier filter.
    pub fn modified_by(&self) -> Option<&User> {
        self.modified_by.as_ref()
    }

    /// Publisher filter.
    pub fn published_by(&self) -> Option<&User> {
        self.published_by.as_ref()
    }

    /// Creation-date filter.
    pub fn created(&self) -> Option<&DateFilter> {
        self.created.as_ref()
    }

    /// Modification-date filter.
    pub fn modified(&self) -> Option<&DateFilter> {
        self.modified.as_ref()
    }

    /// Publication-date filter.
    pub fn published(&self) -> Option<&DateFilter> {
        self.published.as_ref()
    }

    /// Whether only never-modified resources are requested.
    pub fn without_modification(&self) -> bool {
        self.without_modification
    }

    /// Whether only never-published resources are requested.
    pub fn without_publication(&self) -> bool {
        self.without_publication
    }

    /// Lock-owner filter.
    pub fn locked_by(&self) -> Option<&LockFilter> {
        self.locked_by.as_ref()
    }

    /// Element key/value filters (currently without effect, see the
    /// translator documentation).
    pub fn elements(&self) -> &[(String, String)] {
        &self.elements
    }

    /// Pagelet property key/value filters.
    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    /// Pagelet-type filters.
    pub fn pagelets(&self) -> &[PageletFilter] {
        &self.pagelets
    }

    /// Content filename filter.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Content source filter.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// External content location filter, in canonical string form.
    pub fn external_location(&self) -> Option<&str> {
        self.external_location.as_deref()
    }

    /// Content mimetype filter.
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Fulltext search text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the fulltext search is a wildcard (prefix) search.
    pub fn is_wildcard_search(&self) -> bool {
        self.wildcard_search
    }

    /// Opaque passthrough filter, handed to the index unmodified.
    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }
}

/// Builder for [`SearchQuery`].
#[derive(Debug, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    /// Add a resource identifier to match (any of).
    pub fn identifier(mut self, id: impl Into<String>) -> Self {
        self.query.identifiers.push(id.into());
        self
    }

    /// Request an explicit version.
    pub fn version(mut self, version: i64) -> Self {
        self.query.version = Some(version);
        self
    }

    /// Request the preferred rendition of the given version.
    ///
    /// Takes precedence over [`Self::version`].
    pub fn preferred_version(mut self, version: i64) -> Self {
        self.query.preferred_version = Some(version);
        self
    }

    /// Match an exact path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.query.path = Some(path.into());
        self
    }

    /// Match a path prefix.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.query.path_prefix = Some(prefix.into());
        self
    }

    /// Include a resource type (any of).
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.query.types.push(resource_type.into());
        self
    }

    /// Exclude a resource type.
    pub fn without_type(mut self, resource_type: impl Into<String>) -> Self {
        self.query.without_types.push(resource_type.into());
        self
    }

    /// Require at least one of the given subjects.
    pub fn subject_any_of<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query
            .subjects_any
            .extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Require all of the given subjects.
    pub fn subject_all_of<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query
            .subjects_all
            .extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Match a series.
    pub fn series(mut self, series: impl Into<String>) -> Self {
        self.query.series.push(series.into());
        self
    }

    /// Match a page template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.query.template = Some(template.into());
        self
    }

    /// Match only stationary resources.
    pub fn stationary(mut self) -> Self {
        self.query.stationary = true;
        self
    }

    /// Match resources created by the given user.
    pub fn created_by(mut self, user: User) -> Self {
        self.query.created_by = Some(user);
        self
    }

    /// Match resources last modified by the given user.
    pub fn modified_by(mut self, user: User) -> Self {
        self.query.modified_by = Some(user);
        self
    }

    /// Match resources published by the given user.
    pub fn published_by(mut self, user: User) -> Self {
        self.query.published_by = Some(user);
        self
    }

    /// Constrain the creation date.
    pub fn created(mut self, filter: DateFilter) -> Self {
        self.query.created = Some(filter);
        self
    }

    /// Constrain the modification date.
    pub fn modified(mut self, filter: DateFilter) -> Self {
        self.query.modified = Some(filter);
        self
    }

    /// Constrain the publication date.
    pub fn published(mut self, filter: DateFilter) -> Self {
        self.query.published = Some(filter);
        self
    }

    /// Match only resources that have never been modified.
    pub fn without_modification(mut self) -> Self {
        self.query.without_modification = true;
        self
    }

    /// Match only resources that have never been published.
    pub fn without_publication(mut self) -> Self {
        self.query.without_publication = true;
        self
    }

    /// Constrain the lock owner.
    pub fn locked_by(mut self, filter: LockFilter) -> Self {
        self.query.locked_by = Some(filter);
        self
    }

    /// Add an element key/value filter.
    ///
    /// Currently without effect on the translated query; see the translator
    /// documentation.
    pub fn element(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.elements.push((key.into(), value.into()));
        self
    }

    /// Add a pagelet property key/value filter.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.properties.push((key.into(), value.into()));
        self
    }

    /// Add a pagelet-type filter.
    pub fn pagelet(mut self, pagelet: PageletFilter) -> Self {
        self.query.pagelets.push(pagelet);
        self
    }

    /// Match a content filename.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.query.filename = Some(filename.into());
        self
    }

    /// Match a content source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.query.source = Some(source.into());
        self
    }

    /// Match an external content location (canonical string form).
    pub fn external_location(mut self, location: impl Into<String>) -> Self {
        self.query.external_location = Some(location.into());
        self
    }

    /// Match a content mimetype.
    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.query.mimetype = Some(mimetype.into());
        self
    }

    /// Search the fulltext for the given terms (all terms must match).
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.query.text = Some(text.into());
        self.query.wildcard_search = false;
        self
    }

    /// Search the fulltext for a prefix (wildcard search).
    pub fn wildcard_text(mut self, text: impl Into<String>) -> Self {
        self.query.text = Some(text.into());
        self.query.wildcard_search = true;
        self
    }

    /// Attach an opaque passthrough filter, handed to the index unmodified.
    pub fn filter(mut self, filter: Value) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Build the query.
    pub fn build(self) -> SearchQuery {
        self.query
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let query = SearchQuery::builder().build();
        assert!(query.identifiers().is_empty());
        assert!(query.version().is_none());
        assert!(!query.stationary());
        assert!(!query.is_wildcard_search());
        assert!(query.filter().is_none());
    }

    #[test]
    fn test_builder_accumulates_repeatable_dimensions() {
        let query = SearchQuery::builder()
            .identifier("a")
            .identifier("b")
            .resource_type("page")
            .without_type("draft")
            .series("newsletter")
            .build();

        assert_eq!(query.identifiers(), ["a", "b"]);
        assert_eq!(query.types(), ["page"]);
        assert_eq!(query.without_types(), ["draft"]);
        assert_eq!(query.series(), ["newsletter"]);
    }

    #[test]
    fn test_subject_groups_kept_separate() {
        let query = SearchQuery::builder()
            .subject_any_of(["news", "sports"])
            .subject_all_of(["breaking"])
            .build();

        assert_eq!(query.subjects_any(), ["news", "sports"]);
        assert_eq!(query.subjects_all(), ["breaking"]);
    }

    #[test]
    fn test_wildcard_text_sets_flag() {
        let query = SearchQuery::builder().wildcard_text("red").build();
        assert_eq!(query.text(), Some("red"));
        assert!(query.is_wildcard_search());

        let literal = SearchQuery::builder().text("red").build();
        assert!(!literal.is_wildcard_search());
    }

    #[test]
    fn test_pagelet_filter_scopes() {
        let pagelet = PageletFilter::new("text", "paragraph")
            .in_composer("main")
            .at_position(2);

        assert_eq!(pagelet.module(), "text");
        assert_eq!(pagelet.id(), "paragraph");
        assert_eq!(pagelet.composer(), Some("main"));
        assert_eq!(pagelet.position(), Some(2));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let query = SearchQuery::builder()
            .identifier("4bb19980")
            .preferred_version(0)
            .subject_any_of(["news"])
            .locked_by(LockFilter::AnyUser)
            .filter(json!({"acl": "public"}))
            .build();

        let json = serde_json::to_string(&query).unwrap();
        let restored: SearchQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(query, restored);
    }
}
