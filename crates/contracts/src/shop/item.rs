use serde::{Deserialize, Deserializer, Serialize};

/// Orderable catalog entry as served by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Inventory identifier, also used to resolve the icon
    pub name: String,
    /// Display name
    pub label: String,
    /// Unit price, never negative
    #[serde(default, deserialize_with = "non_negative_price")]
    pub price: f64,
}

fn non_negative_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(f64::deserialize(deserializer)?.max(0.0))
}

impl Item {
    pub fn new(name: impl Into<String>, label: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            price: price.max(0.0),
        }
    }
}
