use std::fmt;

use serde_json::Value;

use crate::errors::StoreError;
use crate::storage::Record;

pub const NOT_AN_ARRAY: &str = "Body must be an array of access items";
pub const INVALID_ITEMS: &str = "Invalid access item(s) in payload";

/// Composite identity of an access grant.
///
/// Ordering is by `user_id`, then `project_id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessKey {
    pub user_id: i64,
    pub project_id: i64,
}

impl AccessKey {
    /// Key of a stored record, if both id fields are integers.
    pub fn of(record: &Record) -> Option<Self> {
        Some(Self {
            user_id: record.get("user_id").and_then(as_integer)?,
            project_id: record.get("project_id").and_then(as_integer)?,
        })
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user_id, self.project_id)
    }
}

/// JSON numbers with no fractional part that fit in an `i64`.
/// `1.0` counts; `1.5`, `"1"` and out-of-range values do not.
fn as_integer(v: &Value) -> Option<i64> {
    let Value::Number(n) = v else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn check(item: &Value) -> Result<(), &'static str> {
    let obj = item.as_object().ok_or("item is not an object")?;
    if obj.get("user_id").and_then(as_integer).is_none() {
        return Err("user_id must be an integer");
    }
    if obj.get("project_id").and_then(as_integer).is_none() {
        return Err("project_id must be an integer");
    }
    if !obj.get("read_access").is_some_and(Value::is_boolean) {
        return Err("read_access must be a boolean");
    }
    if !obj.get("write_access").is_some_and(Value::is_boolean) {
        return Err("write_access must be a boolean");
    }
    Ok(())
}

/// Whether a single item satisfies the access record contract. Extra fields are allowed.
pub fn validate(item: &Value) -> bool {
    check(item).is_ok()
}

/// Validate a whole request body, all or nothing.
pub fn validate_batch(body: Value) -> Result<Vec<Record>, StoreError> {
    let Value::Array(items) = body else {
        return Err(StoreError::validation(NOT_AN_ARRAY));
    };
    if let Some((idx, reason)) = items
        .iter()
        .enumerate()
        .find_map(|(idx, item)| check(item).err().map(|r| (idx, r)))
    {
        return Err(StoreError::validation(format!("{INVALID_ITEMS} (item {idx}: {reason})")));
    }
    // ids are stored as plain integers even when submitted as `1.0`
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut map) => {
                for field in ["user_id", "project_id"] {
                    if let Some(id) = map.get(field).and_then(as_integer) {
                        map.insert(field.to_string(), Value::from(id));
                    }
                }
                Some(map)
            }
            _ => None,
        })
        .collect())
}
