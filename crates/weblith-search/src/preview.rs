//! Result preview capability.
//!
//! Search hits can carry a preview of the matched resource. Instead of
//! dispatching over arbitrary objects, every previewable type implements
//! [`SearchPreview`] explicitly and renders itself to a JSON value the
//! gateway attaches to the hit.

use serde_json::{json, Value};

use crate::document::SearchableDocument;

/// Capability to render a search-result preview.
pub trait SearchPreview {
    /// Render the preview as a JSON value.
    fn preview(&self) -> Value;
}

impl SearchPreview for SearchableDocument {
    fn preview(&self) -> Value {
        json!({
            "site": self.site(),
            "id": self.identifier(),
            "type": self.resource_type(),
            "path": self.identity().path(),
            "version": self.identity().version(),
            "fields": self.fields(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
