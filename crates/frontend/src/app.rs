use crate::shop::ui::ShopOverlay;
use crate::shop::{host_bridge, load_settings, NuiGateway, ShopContext, ShopController};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let settings = load_settings();
    log::debug!("Shop settings: {:?}", settings);

    let controller = ShopController::new(NuiGateway::new(), settings);
    host_bridge::install(&controller);

    // Provide the controller handle to the whole overlay via context.
    provide_context(ShopContext::new(controller));

    view! {
        <ShopOverlay />
    }
}
