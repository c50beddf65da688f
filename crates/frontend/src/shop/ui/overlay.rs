use super::item_card::ItemCard;
use super::quantity_modal::QuantityModal;
use crate::shared::components::ui::{Button, ButtonVariant};
use crate::shared::components::PaginationControls;
use crate::shared::format::format_currency;
use crate::shared::icons::icon;
use crate::shop::context::ShopContext;
use crate::shop::controller::ShopEvent;
use contracts::shop::Item;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Shop window: search, item grid, pagination and the quantity dialog
#[component]
pub fn ShopOverlay() -> impl IntoView {
    let ctx = use_context::<ShopContext>().expect("ShopContext not found in context");
    let settings = ctx.controller().settings().clone();
    let focus_delay = settings.focus_delay_ms;

    let search_ref = NodeRef::<leptos::html::Input>::new();
    let (search_text, set_search_text) = signal(String::new());

    let is_open = Memo::new(move |_| ctx.read(|s| s.is_open()));
    let visible = Memo::new(move |_| ctx.read(|s| s.catalog.visible_slice().to_vec()));
    let current_page = Memo::new(move |_| ctx.read(|s| s.catalog.page()));
    let total_pages = Memo::new(move |_| ctx.read(|s| s.catalog.total_pages()));

    // Each open starts with an empty search box that takes focus
    Effect::new(move |was_open: Option<bool>| {
        let open = is_open.get();
        if open && was_open != Some(true) {
            set_search_text.set(String::new());
            Timeout::new(focus_delay, move || {
                if let Some(input) = search_ref.get_untracked() {
                    let _ = input.focus();
                }
            })
            .forget();
        }
        open
    });

    let on_select = Callback::new(move |item: Item| {
        ctx.dispatch(ShopEvent::SelectItem(item));
    });

    let cards = move || {
        visible
            .get()
            .into_iter()
            .map(|item| {
                let icon_url = settings.icon_url(&item.name);
                let price_label = format_currency(item.price, &settings.currency_symbol);
                view! {
                    <ItemCard item=item icon_url=icon_url price_label=price_label on_select=on_select />
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || is_open.get()>
            <div id="app" class="shop">
                <div class="shop__header">
                    <span class="shop__search-icon">{icon("search")}</span>
                    <input
                        node_ref=search_ref
                        class="shop__search"
                        type="text"
                        placeholder="Search items..."
                        prop:value=move || search_text.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            set_search_text.set(text.clone());
                            ctx.dispatch(ShopEvent::SearchInput(text));
                        }
                    />
                    <Button
                        variant=ButtonVariant::Ghost
                        class="shop__close"
                        title="Close"
                        on_click=Callback::new(move |_| {
                            ctx.dispatch(ShopEvent::CloseRequested);
                        })
                    >
                        {icon("x")}
                    </Button>
                </div>
                <div class="shop__grid">{cards.clone()}</div>
                <PaginationControls
                    current_page=current_page
                    total_pages=total_pages
                    on_prev=Callback::new(move |_| {
                        ctx.dispatch(ShopEvent::PrevPage);
                    })
                    on_next=Callback::new(move |_| {
                        ctx.dispatch(ShopEvent::NextPage);
                    })
                />
                <QuantityModal />
            </div>
        </Show>
    }
}
