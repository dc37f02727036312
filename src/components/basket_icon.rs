//! Basket Icon Component
//!
//! Basket button with the item-count badge.

use leptos::prelude::*;

use crate::context::AppContext;

/// What `#basketCount` shows for a basket of `count` items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub hidden: bool,
}

impl Badge {
    pub fn for_count(count: usize) -> Self {
        Self { text: count.to_string(), hidden: count == 0 }
    }
}

/// `#basketIcon` with its `#basketCount` badge (hidden when empty)
#[component]
pub fn BasketIcon(
    /// Whether clicking toggles the floating basket
    #[prop(optional)]
    toggles: bool,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let badge = Memo::new(move |_| Badge::for_count(ctx.basket.get().len()));

    view! {
        <button
            id="basketIcon"
            type="button"
            class="basket-icon"
            title="Panier"
            on:click=move |ev| {
                if toggles {
                    ev.stop_propagation();
                    ctx.toggle_basket();
                }
            }
        >
            "🧺"
            <span id="basketCount" class="badge" hidden=move || badge.get().hidden>
                {move || badge.get().text}
            </span>
        </button>
    }
}
