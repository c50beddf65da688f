use super::item::Item;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_MAX_QTY: u32 = 50;
pub const DEFAULT_PER_PAGE: u32 = 12;

// ============================================================================
// Outbound payloads
// ============================================================================

/// Payload of `shop:getCatalog`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRequest {
    pub filter: String,
}

/// Payload of `shop:placeOrder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub name: String,
    pub amount: u32,
}

/// Reply to `shop:getCatalog`
///
/// `Default` is the rejected marker used when the call fails in transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

impl CatalogResponse {
    pub fn accepted(items: Vec<Item>) -> Self {
        Self {
            ok: true,
            items: Some(items),
        }
    }

    pub fn rejected() -> Self {
        Self::default()
    }

    /// Items to show, or `None` when the reply must not touch local state
    pub fn into_items(self) -> Option<Vec<Item>> {
        if self.ok {
            Some(self.items.unwrap_or_default())
        } else {
            None
        }
    }
}

// ============================================================================
// Inbound host messages
// ============================================================================

/// Data of the `open` message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenPayload {
    #[serde(rename = "maxQty", default, deserialize_with = "lenient_count")]
    pub max_qty: Option<u32>,
    #[serde(rename = "perPage", default, deserialize_with = "lenient_count")]
    pub per_page: Option<u32>,
}

/// JS numbers arrive as floats and may be sent as strings; anything that is
/// not a number of at least 1 counts as absent
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.min(f64::from(u32::MAX)) as u32))
}

/// Messages posted to the overlay window by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum HostMessage {
    Open(OpenPayload),
    Close,
}

impl HostMessage {
    /// Decode a message, `None` for unknown actions or malformed data
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Per-open limits; zero or missing values fall back to the defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_qty: u32,
    pub per_page: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_qty: DEFAULT_MAX_QTY,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl From<&OpenPayload> for SessionConfig {
    fn from(p: &OpenPayload) -> Self {
        Self {
            max_qty: p.max_qty.filter(|v| *v > 0).unwrap_or(DEFAULT_MAX_QTY),
            per_page: p.per_page.filter(|v| *v > 0).unwrap_or(DEFAULT_PER_PAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_message_defaults() {
        let msg = HostMessage::from_json(json!({ "action": "open" })).unwrap();
        let HostMessage::Open(payload) = msg else {
            panic!("expected open");
        };
        assert_eq!(SessionConfig::from(&payload), SessionConfig::default());
    }

    #[test]
    fn test_open_message_with_limits() {
        let msg =
            HostMessage::from_json(json!({ "action": "open", "maxQty": 5, "perPage": 0 })).unwrap();
        let HostMessage::Open(payload) = msg else {
            panic!("expected open");
        };
        let config = SessionConfig::from(&payload);
        assert_eq!(config.max_qty, 5);
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_open_message_float_and_null_limits() {
        let msg = HostMessage::from_json(json!({ "action": "open", "maxQty": 7.9, "perPage": null }))
            .unwrap();
        let HostMessage::Open(payload) = msg else {
            panic!("expected open");
        };
        assert_eq!(payload.max_qty, Some(7));
        assert_eq!(payload.per_page, None);
    }

    #[test]
    fn test_open_message_string_and_bool_limits() {
        let msg = HostMessage::from_json(json!({ "action": "open", "maxQty": "10", "perPage": true }))
            .unwrap();
        let HostMessage::Open(payload) = msg else {
            panic!("expected open");
        };
        assert_eq!(payload.max_qty, Some(10));
        assert_eq!(payload.per_page, None);

        let msg = HostMessage::from_json(json!({ "action": "open", "maxQty": "lots", "perPage": [] }))
            .unwrap();
        let HostMessage::Open(payload) = msg else {
            panic!("expected open");
        };
        assert_eq!(SessionConfig::from(&payload), SessionConfig::default());
    }

    #[test]
    fn test_close_and_unknown_actions() {
        assert_eq!(
            HostMessage::from_json(json!({ "action": "close" })),
            Some(HostMessage::Close)
        );
        assert_eq!(HostMessage::from_json(json!({ "action": "refresh" })), None);
        assert_eq!(HostMessage::from_json(json!(null)), None);
    }

    #[test]
    fn test_catalog_response_marker() {
        let ok: CatalogResponse = serde_json::from_value(json!({ "ok": true })).unwrap();
        assert_eq!(ok.into_items(), Some(vec![]));

        let rejected: CatalogResponse =
            serde_json::from_value(json!({ "ok": false, "items": [] })).unwrap();
        assert_eq!(rejected.into_items(), None);
        assert_eq!(CatalogResponse::rejected().into_items(), None);
    }

    #[test]
    fn test_order_payload_shape() {
        let payload = PlaceOrderRequest {
            name: "bread".into(),
            amount: 3,
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({ "name": "bread", "amount": 3 })
        );
    }
}
