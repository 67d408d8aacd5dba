//! Data-access boundary
//!
//! Repositories sit between request handlers and the pool manager. The trait
//! commits to no query methods; each repository defines its own.

/// Marker for types that read and write through the shared pool manager
pub trait Repository: Send + Sync {}
