//! Storage abstractions for service layer
//!
//! Flat-file JSON collections: tolerant loading and write-then-rename
//! persistence shared by every collection.

pub mod json_array_store;

pub use json_array_store::{atomic_write, load_collection, to_pretty_json, StagedWrite};

/// One element of a collection file. Key order is preserved on round trips.
pub type Record = serde_json::Map<String, serde_json::Value>;
