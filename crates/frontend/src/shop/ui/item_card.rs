use contracts::shop::Item;
use leptos::prelude::*;

/// Grid card for one catalog item
#[component]
pub fn ItemCard(
    item: Item,
    #[prop(into)]
    icon_url: String,
    #[prop(into)]
    price_label: String,
    on_select: Callback<Item>,
) -> impl IntoView {
    let label = item.label.clone();
    let sub = format!("{} • {}", item.name, price_label);

    view! {
        <div class="card" on:click=move |_| on_select.run(item.clone())>
            <div class="thumb">
                <img
                    src=icon_url
                    alt=""
                    on:error=|ev| {
                        // Missing art: drop the broken image rather than show the placeholder glyph
                        let img = event_target::<web_sys::HtmlImageElement>(&ev);
                        let _ = img.remove_attribute("src");
                    }
                />
            </div>
            <div class="meta">
                <div class="name">{label}</div>
                <div class="sub">{sub}</div>
            </div>
        </div>
    }
}
