use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by a successful write endpoint.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct WriteAck {
    pub ok: bool,
    pub count: usize,
}

impl WriteAck {
    pub fn ok(count: usize) -> Self {
        Self { ok: true, count }
    }
}
