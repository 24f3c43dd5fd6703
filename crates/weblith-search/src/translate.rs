//! Query translation.
//!
//! The [`QueryTranslator`] converts a [`SearchQuery`] into a
//! [`TranslatedQuery`], the boolean/term/filter structure the index gateway
//! executes. The wire syntax of the backing index is not a concern here;
//! only the logical structure is produced: positive constraints, negated
//! constraints, missing/exists filters, and an optional opaque passthrough
//! filter, all combined under logical AND.
//!
//! # Constraint groups
//!
//! Constraints on the same field are kept as separate tagged entries rather
//! than flattened into one value set, so "any of" and "all of" groups stay
//! distinct: OR-subjects become one [`ValueMatch::AnyOf`] group, AND-subjects
//! one [`ValueMatch::AllOf`] group, and both may target the subject field in
//! the same query.
//!
//! # Known limitation
//!
//! Element key/value filters have no effect on the translated query. Callers
//! must not rely on them; they are logged and skipped.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::{DateSerializer, IsoDateSerializer};
use crate::query::{DateFilter, LockFilter, SearchQuery};
use crate::schema::IndexSchema;

/// How a constraint's values combine on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMatch {
    /// At least one of the values must match.
    AnyOf(Vec<String>),
    /// Every value must match.
    AllOf(Vec<String>),
}

impl ValueMatch {
    /// The values of this matcher, regardless of combination mode.
    pub fn values(&self) -> &[String] {
        match self {
            Self::AnyOf(values) | Self::AllOf(values) => values,
        }
    }

    /// Whether every value must match.
    pub fn is_conjunctive(&self) -> bool {
        matches!(self, Self::AllOf(_))
    }
}

/// A single field-level constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraint {
    /// The index field this constraint applies to.
    pub field: String,
    /// The values and their combination mode.
    pub matcher: ValueMatch,
}

/// A clause of the expanded boolean expression.
///
/// Produced by [`TranslatedQuery::clauses`]; all clauses combine under
/// logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause<'a> {
    /// Exact match of a single value.
    Term {
        /// Target field.
        field: &'a str,
        /// Required value.
        value: &'a str,
    },
    /// Match of at least one of several values.
    AnyOf {
        /// Target field.
        field: &'a str,
        /// Candidate values.
        values: &'a [String],
    },
    /// Negated match: none of the values may occur.
    Not {
        /// Target field.
        field: &'a str,
        /// Forbidden values.
        values: &'a [String],
    },
    /// The field must be absent or empty.
    Missing {
        /// Target field.
        field: &'a str,
    },
    /// The field must be present and non-empty.
    Exists {
        /// Target field.
        field: &'a str,
    },
}

/// The translated boolean/filter structure of a domain query.
///
/// Within a matcher, multiple values mean "match any" or "match all"
/// depending on the tag; across constraints everything combines under
/// logical AND. Built once per incoming query and consumed immediately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatedQuery {
    must: Vec<FieldConstraint>,
    must_not: Vec<FieldConstraint>,
    require_empty: BTreeSet<String>,
    require_present: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

impl TranslatedQuery {
    /// Positive constraints.
    pub fn must(&self) -> &[FieldConstraint] {
        &self.must
    }

    /// Negated constraints.
    pub fn must_not(&self) -> &[FieldConstraint] {
        &self.must_not
    }

    /// Fields required to be absent or empty.
    pub fn require_empty(&self) -> &BTreeSet<String> {
        &self.require_empty
    }

    /// Fields required to be present and non-empty.
    pub fn require_present(&self) -> &BTreeSet<String> {
        &self.require_present
    }

    /// Opaque passthrough filter, to be ANDed in by the gateway unmodified.
    pub fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }

    /// Whether no constraint at all was produced.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.must_not.is_empty()
            && self.require_empty.is_empty()
            && self.require_present.is_empty()
            && self.filter.is_none()
    }

    /// Expand the constraint groups into flat boolean clauses.
    ///
    /// An `AnyOf` group with one accumulated value becomes an exact-match
    /// [`Clause::Term`]; with two or more it becomes [`Clause::AnyOf`]. An
    /// `AllOf` group expands to one [`Clause::Term`] per value. Negated
    /// groups become [`Clause::Not`], the emptiness filters become
    /// [`Clause::Missing`] and [`Clause::Exists`].
    pub fn clauses(&self) -> Vec<Clause<'_>> {
        let mut clauses = Vec::new();

        for constraint in &self.must {
            match &constraint.matcher {
                ValueMatch::AnyOf(values) if values.len() == 1 => clauses.push(Clause::Term {
                    field: &constraint.field,
                    value: &values[0],
                }),
                ValueMatch::AnyOf(values) => clauses.push(Clause::AnyOf {
                    field: &constraint.field,
                    values,
                }),
                ValueMatch::AllOf(values) => {
                    for value in values {
                        clauses.push(Clause::Term {
                            field: &constraint.field,
                            value,
                        });
                    }
                }
            }
        }

        for constraint in &self.must_not {
            clauses.push(Clause::Not {
                field: &constraint.field,
                values: constraint.matcher.values(),
            });
        }

        for field in &self.require_empty {
            clauses.push(Clause::Missing { field });
        }
        for field in &self.require_present {
            clauses.push(Clause::Exists { field });
        }

        clauses
    }

    fn term(&mut self, field: &str, value: impl Into<String>) {
        self.any_of(field, vec![value.into()]);
    }

    fn any_of(&mut self, field: &str, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.must.push(FieldConstraint {
            field: field.to_string(),
            matcher: ValueMatch::AnyOf(values),
        });
    }

    fn all_of(&mut self, field: &str, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.must.push(FieldConstraint {
            field: field.to_string(),
            matcher: ValueMatch::AllOf(values),
        });
    }

    fn not_term(&mut self, field: &str, value: impl Into<String>) {
        self.not_any_of(field, vec![value.into()]);
    }

    fn not_any_of(&mut self, field: &str, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.must_not.push(FieldConstraint {
            field: field.to_string(),
            matcher: ValueMatch::AnyOf(values),
        });
    }

    fn mark_empty(&mut self, field: &str) {
        self.require_empty.insert(field.to_string());
    }

    fn mark_present(&mut self, field: &str) {
        self.require_present.insert(field.to_string());
    }
}

/// Translates domain queries into the index vocabulary.
///
/// A pure, synchronous transform: it holds only the injected schema and the
/// date-serialization collaborator, so concurrent use is safe.
pub struct QueryTranslator {
    schema: IndexSchema,
    dates: Box<dyn DateSerializer>,
}

impl QueryTranslator {
    /// Create a translator with the default date serializer.
    pub fn new(schema: IndexSchema) -> Self {
        Self::with_date_serializer(schema, Box::new(IsoDateSerializer))
    }

    /// Create a translator with a custom date serializer.
    pub fn with_date_serializer(schema: IndexSchema, dates: Box<dyn DateSerializer>) -> Self {
        Self { schema, dates }
    }

    /// The schema this translator targets.
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Translate a domain query.
    ///
    /// Every set dimension contributes its constraints independently; unset
    /// dimensions contribute nothing. Input is trusted to be well-formed.
    pub fn translate(&self, query: &SearchQuery) -> TranslatedQuery {
        let s = &self.schema;
        let mut out = TranslatedQuery::default();

        // Identity
        out.any_of(s.id, query.identifiers().to_vec());

        // Version: the preferred rendition is found by excluding alternate
        // versions; only one of the two constraints fires.
        if let Some(preferred) = query.preferred_version().filter(|v| *v >= 0) {
            out.not_term(s.alternate_version, preferred.to_string());
        } else if let Some(version) = query.version().filter(|v| *v >= 0) {
            out.term(s.version, version.to_string());
        }

        // Path
        if let Some(path) = query.path() {
            out.term(s.path, path);
        }
        if let Some(prefix) = query.path_prefix() {
            out.term(s.path_prefix, prefix);
        }

        // Types
        out.any_of(s.resource_type, query.types().to_vec());
        out.not_any_of(s.resource_type, query.without_types().to_vec());

        // Subjects: the two semantic groups stay separate entries on the
        // same field.
        out.any_of(s.subject, query.subjects_any().to_vec());
        out.all_of(s.subject, query.subjects_all().to_vec());

        // Series and template
        out.any_of(s.series, query.series().to_vec());
        if let Some(template) = query.template() {
            out.term(s.template, template);
        }

        // Stationary: false means "don't care", not "non-stationary".
        if query.stationary() {
            out.term(s.stationary, "true");
        }

        // Editors and publishers
        if let Some(user) = query.created_by() {
            out.term(s.created_by, user.canonical());
        }
        if let Some(user) = query.modified_by() {
            out.term(s.modified_by, user.canonical());
        }
        if let Some(user) = query.published_by() {
            out.term(s.published_by, user.canonical());
        }

        // Temporal filters
        if let Some(filter) = query.created() {
            out.term(s.created, self.serialize_date(filter));
        }
        if let Some(filter) = query.modified() {
            out.term(s.modified, self.serialize_date(filter));
        }
        if let Some(filter) = query.published() {
            out.term(s.published_from, self.serialize_date(filter));
        }

        // Negative existence
        if query.without_modification() {
            out.mark_empty(s.modified);
        }
        if query.without_publication() {
            out.mark_empty(s.published_from);
        }

        // Lock owner
        match query.locked_by() {
            Some(LockFilter::AnyUser) => out.mark_present(s.locked_by),
            Some(LockFilter::User(user)) => out.term(s.locked_by, user.canonical()),
            None => {}
        }

        // Element filters are not mapped to the index; skipping them is a
        // documented limitation.
        if !query.elements().is_empty() {
            log::debug!(
                "ignoring {} element filter(s): not supported by the index layout",
                query.elements().len()
            );
        }

        // Pagelet properties
        for (key, value) in query.properties() {
            out.term(s.pagelet_properties, format!("{key}={value}"));
        }

        // Pagelet types, optionally scoped to composer and/or position
        for pagelet in query.pagelets() {
            let value = format!("{}/{}", pagelet.module(), pagelet.id());
            let composer = pagelet.composer();
            let position = pagelet.position();

            if let Some(composer) = composer {
                out.term(&s.pagelet_type_in_composer(composer), value.clone());
            }
            if let Some(position) = position {
                out.term(&s.pagelet_type_at_position(position), value.clone());
            }
            if composer.is_none() && position.is_none() {
                out.term(s.pagelet_type, value);
            }
        }

        // Content
        if let Some(filename) = query.filename() {
            out.term(s.filename, filename);
        }
        if let Some(source) = query.source() {
            out.term(s.source, source);
        }
        if let Some(location) = query.external_location() {
            out.term(s.external_location, location);
        }
        if let Some(mimetype) = query.mimetype() {
            out.term(s.mimetype, mimetype);
        }

        // Fulltext
        if let Some(text) = query.text() {
            if query.is_wildcard_search() {
                out.term(s.fulltext, format!("{}*", clean_wildcard(text)));
            } else {
                let tokens: Vec<String> =
                    text.split_whitespace().map(str::to_string).collect();
                out.all_of(s.fulltext, tokens);
            }
        }

        // Passthrough filter, carried through unmodified
        out.filter = query.filter().cloned();

        out
    }

    fn serialize_date(&self, filter: &DateFilter) -> String {
        match filter {
            DateFilter::OnDay(day) => self.dates.day(*day),
            DateFilter::Between { from, to } => self.dates.range(*from, *to),
        }
    }
}

impl std::fmt::Debug for QueryTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryTranslator")
            .field("schema_fields", &self.schema.all_fields().len())
            .finish()
    }
}

/// Strip surrounding whitespace and any trailing wildcard markers so that
/// exactly one `*` is appended.
fn clean_wildcard(text: &str) -> &str {
    text.trim().trim_end_matches('*').trim_end()
}

// ============================================================================
// Tests
// ============================================================================
