use crate::shared::components::ui::{Button, ButtonVariant};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous/next page buttons around a `Page X/Y` label
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<usize>,

    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    let at_first = Signal::derive(move || current_page.get() <= 1);
    let at_last = Signal::derive(move || current_page.get() >= total_pages.get());

    view! {
        <div class="pagination-controls">
            <Button
                variant=ButtonVariant::Secondary
                class="pagination-btn"
                title="Previous page"
                disabled=at_first
                on_click=Callback::new(move |_| on_prev.run(()))
            >
                {icon("chevron-left")}
            </Button>
            <span class="pagination-info">
                {move || format!("Page {}/{}", current_page.get(), total_pages.get().max(1))}
            </span>
            <Button
                variant=ButtonVariant::Secondary
                class="pagination-btn"
                title="Next page"
                disabled=at_last
                on_click=Callback::new(move |_| on_next.run(()))
            >
                {icon("chevron-right")}
            </Button>
        </div>
    }
}
