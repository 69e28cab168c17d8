//! Order Entity

use serde::{Deserialize, Serialize};

/// An order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Monetary amount
    pub amount: f64,

    /// Units reserved by this order
    pub inventory: i64,

    /// True from creation until the order's business transaction is
    /// completed through the API
    pub in_progress: bool,
}

impl Order {
    pub fn new(name: impl Into<String>, amount: f64, inventory: i64) -> Self {
        Self {
            id: crate::TsidGenerator::generate(),
            name: name.into(),
            amount,
            inventory,
            in_progress: true,
        }
    }

    pub fn complete(&mut self) {
        self.in_progress = false;
    }
}
