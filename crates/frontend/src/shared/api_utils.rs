//! NUI callback addressing
//!
//! The game browser routes `POST https://{resource}/{command}` to callbacks
//! registered by the owning resource.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Injected by the game client into every NUI page
    #[wasm_bindgen(js_name = GetParentResourceName, catch)]
    fn get_parent_resource_name() -> Result<String, JsValue>;
}

/// Name of the resource that owns this page
///
/// # Returns
/// - `None` outside the game client (e.g. a plain browser during development)
pub fn resource_name() -> Option<String> {
    get_parent_resource_name()
        .ok()
        .filter(|name| !name.is_empty())
}

/// Build the callback URL for a command
///
/// # Example
/// ```rust
/// use shop_frontend::shared::api_utils::nui_url;
/// assert_eq!(nui_url("qb-shop", "shop:close"), "https://qb-shop/shop:close");
/// ```
pub fn nui_url(resource: &str, command: &str) -> String {
    format!("https://{}/{}", resource, command)
}
