use std::collections::HashMap;

use super::domain::AccessKey;
use crate::storage::Record;

/// How an incoming batch is combined with the stored collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Upsert by `(user_id, project_id)`.
    #[default]
    Merge,
    /// The batch becomes the collection verbatim.
    Replace,
}

impl WriteMode {
    /// `replace` in any case selects `Replace`; anything else, including absence, is `Merge`.
    pub fn from_query(mode: Option<&str>) -> Self {
        match mode {
            Some(m) if m.trim().eq_ignore_ascii_case("replace") => WriteMode::Replace,
            _ => WriteMode::Merge,
        }
    }
}

/// Upsert `incoming` into `existing`.
///
/// Existing records sharing a key collapse to the last one. An incoming
/// record is laid over the stored record with the same key (its fields win,
/// the rest are kept) or appended. Stored records without an integer key
/// pass through unchanged.
pub fn merge(existing: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    let mut merged: Vec<Record> = Vec::with_capacity(existing.len() + incoming.len());
    let mut by_key: HashMap<AccessKey, usize> = HashMap::new();

    for record in existing {
        match AccessKey::of(&record) {
            Some(key) => match by_key.get(&key) {
                Some(&idx) => merged[idx] = record,
                None => {
                    by_key.insert(key, merged.len());
                    merged.push(record);
                }
            },
            None => merged.push(record),
        }
    }

    for record in incoming {
        match AccessKey::of(&record) {
            Some(key) => match by_key.get(&key) {
                Some(&idx) => {
                    let target = &mut merged[idx];
                    for (field, value) in record {
                        target.insert(field, value);
                    }
                }
                None => {
                    by_key.insert(key, merged.len());
                    merged.push(record);
                }
            },
            None => merged.push(record),
        }
    }

    merged
}

pub fn replace(incoming: Vec<Record>) -> Vec<Record> {
    incoming
}

/// Stable sort by `(user_id, project_id)`; keyless records go last in their original order.
pub fn order(records: &mut [Record]) {
    records.sort_by_key(|r| match AccessKey::of(r) {
        Some(key) => (false, key),
        None => (true, AccessKey::default()),
    });
}
