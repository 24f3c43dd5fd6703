//! Resource identity.
//!
//! A resource is a versioned, localized content item identified by its site,
//! identifier, path, and version. Two version numbers are reserved: the live
//! rendition and the draft (work) rendition; any other version denotes an
//! archived snapshot.

use serde::{Deserialize, Serialize};

/// Version number of the live rendition of a resource.
pub const LIVE_VERSION: i64 = 0;

/// Version number of the draft (work) rendition of a resource.
pub const WORK_VERSION: i64 = 1;

/// Identity of a resource snapshot within a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentity {
    site: String,
    identifier: String,
    path: String,
    version: i64,
    resource_type: String,
}

impl ResourceIdentity {
    /// Create a resource identity.
    pub fn new(
        site: impl Into<String>,
        identifier: impl Into<String>,
        path: impl Into<String>,
        version: i64,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            identifier: identifier.into(),
            path: path.into(),
            version,
            resource_type: resource_type.into(),
        }
    }

    /// The site this resource belongs to.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The resource identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The resource path within the site.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resource version.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// The resource type tag (e.g. `"page"`, `"file"`, `"image"`).
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Whether this identity refers to the live rendition.
    pub fn is_live(&self) -> bool {
        self.version == LIVE_VERSION
    }

    /// Whether this identity refers to the draft (work) rendition.
    pub fn is_work(&self) -> bool {
        self.version == WORK_VERSION
    }
}

// ============================================================================
// Tests
// ============================================================================
