//! Product Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product record; identity is the store-assigned id, never the name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Create/update request body
///
/// Fields are optional so that missing values surface as a 400 with the
/// canonical message instead of a deserialization rejection. PUT has no
/// partial-update semantics: both fields fully overwrite the record.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl ProductPayload {
    /// Both fields present and the name non-empty, or nothing
    pub fn validated(self) -> Option<(String, f64)> {
        match (self.name, self.price) {
            (Some(name), Some(price)) if !name.trim().is_empty() => Some((name, price)),
            _ => None,
        }
    }
}
