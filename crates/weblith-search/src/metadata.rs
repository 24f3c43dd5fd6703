//! Resource metadata model.
//!
//! Metadata extractors walk a resource and emit an ordered sequence of
//! [`MetadataEntry`] values, one per searchable attribute. Each entry carries
//! language-neutral values, per-language values, and a flag deciding whether
//! the values also feed the fulltext aggregation.
//!
//! Values are [`serde_json::Value`], matching the platform's generic value
//! handling: strings, numbers, booleans, and arrays all flatten into the
//! index the same way.
//!
//! # Creating Entries
//!
//! ```rust
//! use weblith_search::MetadataEntry;
//!
//! let mut entry = MetadataEntry::new("title")?.with_fulltext();
//! entry.add_value("Hello World");
//! entry.add_localized_value("de".into(), "Hallo Welt");
//! # Ok::<(), weblith_core::Error>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use weblith_core::{Error, Language, Result};

/// Insertion-ordered, duplicate-free list of metadata values.
///
/// Preserves the order values were added in (the order they later appear in
/// the fulltext aggregation) while suppressing duplicates by equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueList(Vec<Value>);

impl ValueList {
    /// Create an empty value list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value unless an equal value is already present.
    ///
    /// Returns `true` if the value was added.
    pub fn push(&mut self, value: Value) -> bool {
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    /// The values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Value> for ValueList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push(value);
        }
        list
    }
}

/// A named, possibly localized metadata attribute of a resource.
///
/// The name is fixed at creation and must not be blank. Value lists never
/// contain duplicates within the same entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    name: String,
    values: ValueList,
    localized: BTreeMap<Language, ValueList>,
    add_to_fulltext: bool,
}

impl MetadataEntry {
    /// Create an entry for the given attribute name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Contract`] if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::contract("metadata entry name must not be blank"));
        }
        Ok(Self {
            name,
            values: ValueList::new(),
            localized: BTreeMap::new(),
            add_to_fulltext: false,
        })
    }

    /// Mark this entry as contributing to the fulltext aggregation.
    pub fn with_fulltext(mut self) -> Self {
        self.add_to_fulltext = true;
        self
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a language-neutral value. Duplicates are suppressed.
    ///
    /// Returns `true` if the value was added.
    pub fn add_value(&mut self, value: impl Into<Value>) -> bool {
        self.values.push(value.into())
    }

    /// Add a value for a specific language. Duplicates are suppressed per
    /// language.
    ///
    /// Returns `true` if the value was added.
    pub fn add_localized_value(&mut self, language: Language, value: impl Into<Value>) -> bool {
        self.localized.entry(language).or_default().push(value.into())
    }

    /// The language-neutral values.
    pub fn values(&self) -> &ValueList {
        &self.values
    }

    /// The per-language values, ordered by language.
    pub fn localized_values(&self) -> &BTreeMap<Language, ValueList> {
        &self.localized
    }

    /// Whether this entry feeds the fulltext aggregation.
    pub fn add_to_fulltext(&self) -> bool {
        self.add_to_fulltext
    }

    /// Whether the entry carries no values at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.localized.values().all(ValueList::is_empty)
    }
}

/// Per-resource-type metadata extraction contract.
///
/// Implementations walk a resource of their type and return the ordered
/// entry sequence covering every searchable attribute. The entry order is
/// significant: it determines fulltext aggregation order.
pub trait MetadataExtractor: Send + Sync {
    /// The resource type this extractor understands.
    type Resource;

    /// Extract the ordered metadata entries for a resource.
    fn extract(&self, resource: &Self::Resource) -> Result<Vec<MetadataEntry>>;
}

// ============================================================================
// Tests
// ============================================================================
