//! Basket Panel Component
//!
//! Basket contents with per-row remove buttons.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::components::{ActivityCard, SlotRef};
use crate::context::AppContext;

/// Basket list (`#basketContent` inline, `#floatingBasket` in the editor)
#[component]
pub fn BasketPanel(
    /// Element id of the container
    #[prop(into)]
    container_id: String,
    /// Rows become drag sources when set
    #[prop(default = None)]
    dnd: Option<DndSignals<SlotRef>>,
    /// Shown only while the basket is toggled open
    #[prop(optional)]
    floating: bool,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let on_remove = Callback::new(move |id: String| ctx.remove_from_basket(&id));

    view! {
        <div
            id=container_id
            class=if floating { "basket-panel floating" } else { "basket-panel" }
            style=move || if floating && !ctx.basket_open.get() { "display: none;" } else { "display: block;" }
            on:click=move |ev| {
                if floating {
                    ev.stop_propagation();
                }
            }
        >
            <h4 class="basket-title">"Votre panier"</h4>
            {move || {
                let items = ctx.basket.get();
                if items.is_empty() {
                    view! { <p class="basket-empty">"Aucune activité ajoutée."</p> }.into_any()
                } else {
                    items
                        .into_iter()
                        .map(|activity| view! {
                            <ActivityCard activity=activity dnd=dnd on_remove=Some(on_remove) />
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}
