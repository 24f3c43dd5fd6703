//! Weblith Core — shared types, errors, and identities.
//!
//! This crate provides the foundational types used across all Weblith crates.
//! It has no internal Weblith dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`language`]: Language identifiers for localized content
//! - [`resource`]: Resource identity and version sentinels
//! - [`user`]: User identities and their canonical serialized form

pub mod error;
pub mod language;
pub mod resource;
pub mod user;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use language::Language;
pub use resource::{ResourceIdentity, LIVE_VERSION, WORK_VERSION};
pub use user::User;
