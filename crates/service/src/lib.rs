//! Service layer for the flat-file access backend.
//! - `storage`: tolerant JSON array loading and atomic write-then-rename.
//! - `store`: the injected `CollectionStore` abstraction and its file implementation.
//! - `access`: validation, merge/replace, ordering and the write pipeline.

pub mod access;
pub mod errors;
pub mod storage;
pub mod store;
