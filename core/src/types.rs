//! Domain DTOs for the category API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The server owns the data; nothing here is cached or persisted. Integration
//! tests catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a category. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single category returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Request payload for creating or renaming a category.
///
/// `name` is sent as-is; an empty name is rejected by the server, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
