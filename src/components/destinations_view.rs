//! Destinations View
//!
//! Search page: live search on the left, basket on the right.

use leptos::prelude::*;

use crate::components::{BasketIcon, BasketPanel, SearchPanel};

#[component]
pub fn DestinationsView() -> impl IntoView {
    view! {
        <div class="destinations-layout">
            <header class="top-bar">
                <h1>"Destinations"</h1>
                <BasketIcon />
            </header>
            <main class="main-content">
                <SearchPanel />
            </main>
            <aside class="basket-sidebar">
                <BasketPanel container_id="basketContent" />
            </aside>
        </div>
    }
}
