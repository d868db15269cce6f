//! Pair key module - order-independent drug pair identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order-independent identity for a drug pair
///
/// Built from the two resolved identifiers sorted lexicographically, so the
/// pair (A, B) and the pair (B, A) produce the same key. Grouping and dedup
/// are keyed on this value; raw names never participate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    /// Create a pair key from two resolved identifiers, in any order
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    /// The lexicographically smaller identifier
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger identifier
    pub fn second(&self) -> &str {
        &self.second
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.first, self.second)
    }
}
