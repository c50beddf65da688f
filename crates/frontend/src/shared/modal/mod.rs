use crate::shared::components::ui::{Button, ButtonVariant};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Centered dialog over a dimming overlay.
///
/// Clicking the overlay or the close button calls `on_close`. Escape is
/// handled by the window key listener, not here.
#[component]
pub fn Modal(
    #[prop(into)]
    title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let handle_overlay_click = move |_: ev::MouseEvent| on_close.run(());

    // Clicks inside the dialog must not reach the overlay
    let stop_propagation = move |ev: ev::MouseEvent| ev.stop_propagation();

    view! {
        <div class="modal-overlay" on:click=handle_overlay_click>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button
                        variant=ButtonVariant::Ghost
                        class="modal__close"
                        title="Close"
                        on_click=Callback::new(move |_| on_close.run(()))
                    >
                        {icon("x")}
                    </Button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
