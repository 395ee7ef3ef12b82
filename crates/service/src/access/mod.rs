//! Access grants: validation, merge/replace and ordering of the
//! `(user_id, project_id)` keyed collection, plus the write pipeline.

pub mod domain;
pub mod merge;
pub mod service;

pub use domain::{validate, validate_batch, AccessKey};
pub use merge::{merge, order, replace, WriteMode};
pub use service::{AccessService, WriteOutcome};
