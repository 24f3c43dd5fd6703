//! Resource indexing and search-query translation for Weblith.
//!
//! This crate turns versioned, multilingual content resources into flat
//! documents for a text index (write path) and translates structured domain
//! queries into the index's boolean/term/filter vocabulary (read path). The
//! backing index itself sits behind the [`IndexGateway`] trait; this crate
//! only defines the logical document shape and query structure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      weblith-search                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Write path                                                 │
//! │  MetadataExtractor ──► DocumentAssembler ──► IndexGateway   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Read path                                                  │
//! │  SearchQuery ──► QueryTranslator ──► IndexGateway           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexSchema (immutable field-name registry)                │
//! │  DateSerializer (opaque temporal tokens)                    │
//! │  MemoryGateway (linear-scan fallback)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both the assembler and the translator are synchronous pure transforms
//! over in-memory input; they hold no shared mutable state and are safe to
//! call concurrently. All I/O, batching, and retry behavior belongs to the
//! gateway implementation.
//!
//! # Example
//!
//! ```rust
//! use weblith_search::{IndexSchema, QueryTranslator, SearchQuery};
//!
//! let translator = QueryTranslator::new(IndexSchema::build());
//! let query = SearchQuery::builder()
//!     .resource_type("page")
//!     .text("red blue")
//!     .build();
//!
//! let translated = translator.translate(&query);
//! assert_eq!(translated.must().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dates;
pub mod document;
pub mod gateway;
pub mod metadata;
pub mod preview;
pub mod query;
pub mod schema;
pub mod translate;

// Re-exports
pub use dates::{DateSerializer, IsoDateSerializer};
pub use document::{DocumentAssembler, SearchableDocument};
pub use gateway::{IndexGateway, MemoryGateway, SearchConfig, SearchHit, SearchHits};
pub use metadata::{MetadataEntry, MetadataExtractor, ValueList};
pub use preview::SearchPreview;
pub use query::{DateFilter, LockFilter, PageletFilter, SearchQuery, SearchQueryBuilder};
pub use schema::{IndexSchema, SCHEMA_VERSION};
pub use translate::{Clause, FieldConstraint, QueryTranslator, TranslatedQuery, ValueMatch};
