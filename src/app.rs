//! Wishadv Frontend App
//!
//! Root component: provides the shared context, keeps the basket in sync
//! with storage, and picks the page for the current path.

use leptos::ev;
use leptos::prelude::*;

use crate::components::{DestinationsView, JourneyEditor};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::Activity;
use crate::route;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // State
    let basket = signal(Vec::<Activity>::new());
    let basket_open = signal(false);

    let ctx = AppContext::new(config, basket, basket_open);
    provide_context(ctx);

    ctx.migrate_basket();
    ctx.refresh_basket();

    // Other tabs write the same key
    let basket_key = ctx.basket_key();
    let _ = window_event_listener(ev::storage, move |ev: web_sys::StorageEvent| {
        if ev.key().as_deref() == Some(basket_key.as_str()) {
            log::debug!("[BASKET] Changed in another tab");
            ctx.refresh_basket();
        }
    });

    // Ctrl/Cmd+Alt+L prints the buffered log history
    let _ = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if is_log_dump_shortcut(ev.ctrl_key() || ev.meta_key(), ev.alt_key(), &ev.code()) {
            ev.prevent_default();
            web_sys::console::log_1(&rolling_logger::dump().into());
        }
    });

    let pathname = window().location().pathname().unwrap_or_default();
    log::info!("[APP] Starting on {}", pathname);

    if route::is_editor_path(&pathname) {
        view! { <JourneyEditor pathname=pathname /> }.into_any()
    } else {
        view! { <DestinationsView /> }.into_any()
    }
}

/// Matched on the physical key: Alt changes `key()` on some layouts
fn is_log_dump_shortcut(command: bool, alt: bool, code: &str) -> bool {
    command && alt && code == "KeyL"
}
