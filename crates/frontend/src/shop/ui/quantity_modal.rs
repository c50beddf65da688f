use crate::shared::components::ui::Button;
use crate::shared::modal::Modal;
use crate::shop::context::ShopContext;
use crate::shop::controller::ShopEvent;
use leptos::prelude::*;

/// Quantity picker for the selected item; rendered only while one is selected
#[component]
pub fn QuantityModal() -> impl IntoView {
    let ctx = use_context::<ShopContext>().expect("ShopContext not found in context");
    let symbol = ctx.controller().settings().currency_symbol.clone();

    // Memos keep the dialog mounted while only the quantity changes
    let title = Memo::new({
        let symbol = symbol.clone();
        move |_| ctx.read(|s| s.selection.modal_title(&symbol))
    });
    let quantity = Memo::new(move |_| ctx.read(|s| s.selection.quantity()));
    let max_qty = Memo::new(move |_| ctx.read(|s| s.selection.max_qty()));
    let total = Memo::new(move |_| {
        ctx.read(|s| s.selection.total_label(&symbol))
            .unwrap_or_default()
    });

    let on_close = Callback::new(move |_| {
        ctx.dispatch(ShopEvent::DismissModal);
    });

    move || {
        title.get().map(|title| {
            view! {
                <Modal title=title on_close=on_close>
                    <input
                        class="modal__qty"
                        type="number"
                        min="1"
                        max=move || max_qty.get().to_string()
                        prop:value=move || quantity.get().to_string()
                        on:input=move |ev| {
                            ctx.dispatch(ShopEvent::QuantityInput(event_target_value(&ev)));
                            // Write the clamped value back even when it did not change
                            let normalized = ctx.controller().with_session(|s| s.selection.quantity());
                            event_target::<web_sys::HtmlInputElement>(&ev)
                                .set_value(&normalized.to_string());
                        }
                    />
                    <div class="modal__price">{move || total.get()}</div>
                    <div class="modal-footer">
                        <Button on_click=Callback::new(move |_| {
                            ctx.dispatch(ShopEvent::ConfirmOrder);
                        })>
                            "Order"
                        </Button>
                    </div>
                </Modal>
            }
        })
    }
}
