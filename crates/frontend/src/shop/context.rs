use super::controller::{Outcome, ShopController, ShopEvent};
use super::gateway::NuiGateway;
use super::session::ShopSession;
use leptos::prelude::*;
use std::rc::Rc;

/// Reactive handle on the controller, provided to the component tree.
///
/// The controller is single-threaded, so it lives in local storage; a
/// revision counter bumped by the controller drives re-rendering.
#[derive(Clone, Copy)]
pub struct ShopContext {
    controller: StoredValue<ShopController<NuiGateway>, LocalStorage>,
    revision: RwSignal<u64>,
}

impl ShopContext {
    pub fn new(controller: ShopController<NuiGateway>) -> Self {
        let revision = RwSignal::new(0u64);
        controller.subscribe(Rc::new(move || revision.update(|r| *r += 1)));
        Self {
            controller: StoredValue::new_local(controller),
            revision,
        }
    }

    pub fn controller(&self) -> ShopController<NuiGateway> {
        self.controller.get_value()
    }

    /// Tracked read of the session
    pub fn read<R>(&self, f: impl FnOnce(&ShopSession) -> R) -> R {
        self.revision.track();
        self.controller().with_session(f)
    }

    pub fn dispatch(&self, event: ShopEvent) -> Outcome {
        self.controller().dispatch(event)
    }
}
