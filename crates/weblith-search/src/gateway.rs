//! Index gateway contract and in-memory fallback.
//!
//! The [`IndexGateway`] trait is the seam between the pure transforms of
//! this crate and the backing text index. Implementations own all I/O,
//! connection management, batching, and retry behavior; assembled documents
//! and translated queries are plain value objects that can be handed to
//! concurrent gateway calls without further synchronization.
//!
//! [`MemoryGateway`] is a linear-scan implementation kept for small
//! installations and tests. It evaluates translated queries directly against
//! the stored documents.
//!
//! # Limitations of the memory gateway
//!
//! - O(n) search time, no relevance scoring (every match scores 1.0)
//! - Term matching is exact-value or whitespace-token based; a trailing `*`
//!   matches token prefixes
//! - Opaque passthrough filters are not evaluated (logged and skipped)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use weblith_core::Result;

use crate::document::SearchableDocument;
use crate::preview::SearchPreview;
use crate::translate::{TranslatedQuery, ValueMatch};

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default result limit when a search does not specify one.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Whether hits carry a rendered preview of the matched document.
    #[serde(default = "default_true")]
    pub previews_enabled: bool,
}

fn default_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            previews_enabled: default_true(),
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Site of the matched resource.
    pub site: String,

    /// Identifier of the matched resource.
    pub id: String,

    /// Resource type of the matched resource.
    pub resource_type: String,

    /// Path of the matched resource.
    pub path: String,

    /// Version of the matched snapshot.
    pub version: i64,

    /// Relevance score (higher is better).
    pub relevance: f32,

    /// Rendered preview of the matched document, if enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Value>,
}

/// Collection of search hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHits {
    /// Matched items, best first.
    pub items: Vec<SearchHit>,

    /// Total number of matching documents (may exceed `items.len()` when
    /// limited).
    pub total: usize,

    /// Gateway that executed the search.
    pub gateway: String,
}

impl SearchHits {
    /// Create empty hits.
    pub fn empty(gateway: &str) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            gateway: gateway.to_string(),
        }
    }
}

/// Abstract index gateway.
///
/// Executes assembled documents (write path) and translated queries (read
/// path) against the backing index.
#[async_trait]
pub trait IndexGateway: Send + Sync {
    /// Index or replace a document.
    ///
    /// A document with the same site, identifier, and version replaces the
    /// previously stored snapshot.
    async fn index(&self, document: SearchableDocument) -> Result<()>;

    /// Delete all snapshots of a resource.
    async fn delete(&self, site: &str, id: &str) -> Result<()>;

    /// Execute a translated query.
    async fn search(&self, query: TranslatedQuery, limit: Option<usize>) -> Result<SearchHits>;

    /// Gateway name for diagnostics.
    fn name(&self) -> &str;

    /// Whether the gateway is ready to handle requests.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Linear-scan in-memory gateway.
///
/// Fallback for small installations and the test vehicle for the
/// assembler/translator pair.
pub struct MemoryGateway {
    config: SearchConfig,
    documents: RwLock<Vec<SearchableDocument>>,
}

impl MemoryGateway {
    /// Create an empty in-memory gateway.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether no documents are stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[async_trait]
impl IndexGateway for MemoryGateway {
    async fn index(&self, document: SearchableDocument) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.retain(|existing| {
            existing.site() != document.site()
                || existing.identifier() != document.identifier()
                || existing.identity().version() != document.identity().version()
        });
        documents.push(document);
        Ok(())
    }

    async fn delete(&self, site: &str, id: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.retain(|existing| existing.site() != site || existing.identifier() != id);
        Ok(())
    }

    async fn search(&self, query: TranslatedQuery, limit: Option<usize>) -> Result<SearchHits> {
        if query.filter().is_some() {
            log::debug!("opaque passthrough filter is not evaluated by the memory gateway");
        }

        let limit = limit.unwrap_or(self.config.default_limit);
        let documents = self.documents.read().await;

        let matches: Vec<&SearchableDocument> = documents
            .iter()
            .filter(|doc| matches_query(doc, &query))
            .collect();
        let total = matches.len();

        let items = matches
            .into_iter()
            .take(limit)
            .map(|doc| SearchHit {
                site: doc.site().to_string(),
                id: doc.identifier().to_string(),
                resource_type: doc.resource_type().to_string(),
                path: doc.identity().path().to_string(),
                version: doc.identity().version(),
                relevance: 1.0,
                preview: self.config.previews_enabled.then(|| doc.preview()),
            })
            .collect();

        Ok(SearchHits {
            items,
            total,
            gateway: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGateway")
            .field("default_limit", &self.config.default_limit)
            .finish()
    }
}

fn matches_query(document: &SearchableDocument, query: &TranslatedQuery) -> bool {
    for constraint in query.must() {
        let matched = match &constraint.matcher {
            ValueMatch::AnyOf(values) => values
                .iter()
                .any(|value| field_matches(document, &constraint.field, value)),
            ValueMatch::AllOf(values) => values
                .iter()
                .all(|value| field_matches(document, &constraint.field, value)),
        };
        if !matched {
            return false;
        }
    }

    for constraint in query.must_not() {
        let matched = constraint
            .matcher
            .values()
            .iter()
            .any(|value| field_matches(document, &constraint.field, value));
        if matched {
            return false;
        }
    }

    for field in query.require_empty() {
        if field_present(document, field) {
            return false;
        }
    }
    for field in query.require_present() {
        if !field_present(document, field) {
            return false;
        }
    }

    true
}

fn field_present(document: &SearchableDocument, field: &str) -> bool {
    document
        .values(field)
        .is_some_and(|values| values.iter().any(|v| !value_text(v).is_empty()))
}

/// Match a term against a field: exact value match or whitespace-token
/// match; a trailing `*` turns the term into a token-prefix match.
fn field_matches(document: &SearchableDocument, field: &str, term: &str) -> bool {
    let Some(values) = document.values(field) else {
        return false;
    };

    if let Some(prefix) = term.strip_suffix('*') {
        values.iter().any(|value| {
            value_text(value)
                .split_whitespace()
                .any(|token| token.starts_with(prefix))
        })
    } else {
        values.iter().any(|value| {
            let text = value_text(value);
            text == term || text.split_whitespace().any(|token| token == term)
        })
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use weblith_core::{ResourceIdentity, LIVE_VERSION, WORK_VERSION};

    use crate::document::DocumentAssembler;
    use crate::metadata::MetadataEntry;
    use crate::query::SearchQuery;
    use crate::schema::IndexSchema;
    use crate::translate::QueryTranslator;

    fn document(site: &str, id: &str, version: i64, entries: &[MetadataEntry]) -> SearchableDocument {
        let identity = ResourceIdentity::new(site, id, format!("/{id}"), version, "page");
        DocumentAssembler::new(IndexSchema::build())
            .assemble(&identity, entries)
            .unwrap()
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

    fn translate(query: SearchQuery) -> TranslatedQuery {
        QueryTranslator::new(IndexSchema::build()).translate(&query)
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 10);
        assert!(config.previews_enabled);
    }

    #[test]
    fn test_search_config_deserialization_with_defaults() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_limit, 10);
    }

    #[tokio::test]
    async fn test_index_replaces_same_snapshot() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document("main", "a", LIVE_VERSION, &[]))
            .await
            .unwrap();
        gateway
            .index(document("main", "a", LIVE_VERSION, &[]))
            .await
            .unwrap();
        gateway
            .index(document("main", "a", WORK_VERSION, &[]))
            .await
            .unwrap();

        assert_eq!(gateway.len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_removes_all_snapshots() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document("main", "a", LIVE_VERSION, &[]))
            .await
            .unwrap();
        gateway
            .index(document("main", "a", WORK_VERSION, &[]))
            .await
            .unwrap();
        gateway
            .index(document("main", "b", LIVE_VERSION, &[]))
            .await
            .unwrap();

        gateway.delete("main", "a").await.unwrap();
        assert_eq!(gateway.len().await, 1);
    }

    #[tokio::test]
    async fn test_search_term_match() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document(
                "main",
                "a",
                LIVE_VERSION,
                &[entry("subject", &["news"], false)],
            ))
            .await
            .unwrap();
        gateway
            .index(document(
                "main",
                "b",
                LIVE_VERSION,
                &[entry("subject", &["sports"], false)],
            ))
            .await
            .unwrap();

        let query = translate(SearchQuery::builder().subject_any_of(["news"]).build());
        let hits = gateway.search(query, None).await.unwrap();

        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].id, "a");
        assert_eq!(hits.gateway, "memory");
    }

    #[tokio::test]
    async fn test_search_fulltext_tokens_and_prefix() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document(
                "main",
                "a",
                LIVE_VERSION,
                &[entry("title", &["red blue green"], true)],
            ))
            .await
            .unwrap();

        let all_terms = translate(SearchQuery::builder().text("red green").build());
        assert_eq!(gateway.search(all_terms, None).await.unwrap().total, 1);

        let missing_term = translate(SearchQuery::builder().text("red yellow").build());
        assert_eq!(gateway.search(missing_term, None).await.unwrap().total, 0);

        let prefix = translate(SearchQuery::builder().wildcard_text("gre").build());
        assert_eq!(gateway.search(prefix, None).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_search_require_empty_and_present() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document(
                "main",
                "locked",
                LIVE_VERSION,
                &[entry("locked_by", &["editor"], false)],
            ))
            .await
            .unwrap();
        gateway
            .index(document("main", "free", LIVE_VERSION, &[]))
            .await
            .unwrap();

        let locked = translate(
            SearchQuery::builder()
                .locked_by(crate::query::LockFilter::AnyUser)
                .build(),
        );
        let hits = gateway.search(locked, None).await.unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].id, "locked");

        let unmodified = translate(SearchQuery::builder().without_modification().build());
        assert_eq!(gateway.search(unmodified, None).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_search_limit_keeps_total() {
        let gateway = MemoryGateway::default();
        for id in ["a", "b", "c"] {
            gateway
                .index(document(
                    "main",
                    id,
                    LIVE_VERSION,
                    &[entry("subject", &["news"], false)],
                ))
                .await
                .unwrap();
        }

        let query = translate(SearchQuery::builder().subject_any_of(["news"]).build());
        let hits = gateway.search(query, Some(2)).await.unwrap();
        assert_eq!(hits.items.len(), 2);
        assert_eq!(hits.total, 3);
    }

    #[tokio::test]
    async fn test_previews_toggle() {
        let gateway = MemoryGateway::new(SearchConfig {
            previews_enabled: false,
            ..Default::default()
        });
        gateway
            .index(document(
                "main",
                "a",
                LIVE_VERSION,
                &[entry("subject", &["news"], false)],
            ))
            .await
            .unwrap();

        let query = translate(SearchQuery::builder().subject_any_of(["news"]).build());
        let hits = gateway.search(query, None).await.unwrap();
        assert!(hits.items[0].preview.is_none());
    }

    #[tokio::test]
    async fn test_must_not_excludes() {
        let gateway = MemoryGateway::default();
        gateway
            .index(document(
                "main",
                "a",
                LIVE_VERSION,
                &[entry("type", &["news"], false)],
            ))
            .await
            .unwrap();
        gateway
            .index(document(
                "main",
                "b",
                LIVE_VERSION,
                &[entry("type", &["draft"], false)],
            ))
            .await
            .unwrap();

        let query = translate(SearchQuery::builder().without_type("draft").build());
        let hits = gateway.search(query, None).await.unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].id, "a");
    }
}
