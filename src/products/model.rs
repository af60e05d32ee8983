use serde::{Deserialize, Serialize};

/// A product offered by a retailer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier; `0` means "not yet assigned"
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub retailer: String,
    #[serde(default)]
    pub price: f32,
    #[serde(default)]
    pub description: String,
}
