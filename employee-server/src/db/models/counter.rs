//! Counter Model

use serde::{Deserialize, Serialize};

pub const COUNTER_TABLE: &str = "counter";

/// Named monotonic counter, one record per series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub name: String,
    pub seq: u64,
}
