//! Window-level listeners: host messages in, blocked keys out.

use super::controller::{Outcome, ShopController, ShopEvent};
use super::gateway::HostGateway;
use contracts::shop::HostMessage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Decode `MessageEvent.data` posted by the host
pub fn decode_host_message(data: JsValue) -> Option<HostMessage> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(data).ok()?;
    HostMessage::from_json(value)
}

/// Attach the `message` and `keydown` listeners for the lifetime of the page
pub fn install<G: HostGateway + 'static>(controller: &ShopController<G>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window object; host bridge not installed");
        return;
    };

    let ctl = controller.clone();
    let on_message = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
        match decode_host_message(event.data()) {
            Some(message) => ctl.handle_host_message(message),
            None => log::debug!("Ignoring window message without a known action"),
        }
    }) as Box<dyn FnMut(_)>);
    if let Err(e) =
        window.add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
    {
        log::error!("Failed to listen for host messages: {:?}", e);
    }
    on_message.forget();

    let ctl = controller.clone();
    let on_keydown = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        if ctl.dispatch(ShopEvent::KeyDown(event.key())) == Outcome::PreventDefault {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    if let Err(e) =
        window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
    {
        log::error!("Failed to listen for key presses: {:?}", e);
    }
    on_keydown.forget();
}
