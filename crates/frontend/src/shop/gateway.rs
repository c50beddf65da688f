//! Request gateway to the host resource.
//!
//! Every call is a JSON `POST` answered with JSON. Failures never escape the
//! typed helpers: they are logged and turn into the reply type's default,
//! which callers treat as "no update".

use crate::shared::api_utils::{nui_url, resource_name};
use async_trait::async_trait;
use contracts::shop::{commands, CatalogRequest, CatalogResponse, PlaceOrderRequest};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Parent resource name unavailable")]
    NoResource,

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    #[error("Failed to send request: {0}")]
    Send(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Transport seam between the controller and the host
#[async_trait(?Send)]
pub trait HostGateway {
    async fn post(&self, command: &str, payload: Value) -> Result<Value, GatewayError>;
}

/// Gateway over the game browser's NUI callback endpoint
#[derive(Debug, Clone, Default)]
pub struct NuiGateway {
    resource: Option<String>,
}

impl NuiGateway {
    /// Resolve the owning resource once, at startup
    pub fn new() -> Self {
        let resource = resource_name();
        if resource.is_none() {
            log::warn!("GetParentResourceName() unavailable; host calls will fail");
        }
        Self { resource }
    }

    pub fn with_resource(resource: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
        }
    }
}

#[async_trait(?Send)]
impl HostGateway for NuiGateway {
    async fn post(&self, command: &str, payload: Value) -> Result<Value, GatewayError> {
        let resource = self.resource.as_deref().ok_or(GatewayError::NoResource)?;

        let response = Request::post(&nui_url(resource, command))
            .header("Content-Type", "application/json")
            .json(&payload)
            .map_err(|e| GatewayError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Send(e.to_string()))?;

        if !response.ok() {
            return Err(GatewayError::Status(response.status()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Send `payload` as `command` and decode the reply.
///
/// Resolves to `Resp::default()` on any transport or decode failure.
pub async fn request<G, Req, Resp>(gateway: &G, command: &str, payload: &Req) -> Resp
where
    G: HostGateway + ?Sized,
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned + Default,
{
    let body = match serde_json::to_value(payload) {
        Ok(Value::Null) => Value::Object(Default::default()),
        Ok(v) => v,
        Err(e) => {
            log::warn!("{} not sent: {}", command, GatewayError::Serialize(e.to_string()));
            return Resp::default();
        }
    };

    let reply = match gateway.post(command, body).await {
        Ok(v) => v,
        Err(e) => {
            log::warn!("{} failed: {}", command, e);
            return Resp::default();
        }
    };

    match serde_json::from_value(reply) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("{} failed: {}", command, GatewayError::Decode(e.to_string()));
            Resp::default()
        }
    }
}

/// `shop:getCatalog`; a failed call reads as a rejected reply
pub async fn fetch_catalog<G: HostGateway + ?Sized>(gateway: &G, filter: &str) -> CatalogResponse {
    let payload = CatalogRequest {
        filter: filter.to_string(),
    };
    request(gateway, commands::GET_CATALOG, &payload).await
}

/// `shop:placeOrder`; the reply is not inspected
pub async fn place_order<G: HostGateway + ?Sized>(gateway: &G, order: &PlaceOrderRequest) {
    let _: Value = request(gateway, commands::PLACE_ORDER, order).await;
}

/// `shop:close`, sent whenever the overlay hides
pub async fn notify_closed<G: HostGateway + ?Sized>(gateway: &G) {
    let _: Value = request(gateway, commands::CLOSE, &Value::Null).await;
}
