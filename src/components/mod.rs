//! UI Components
//!
//! Leptos components for the destinations page and the journey editor.

mod activity_card;
mod basket_icon;
mod basket_panel;
mod day_section;
mod destinations_view;
mod journey_editor;
mod search_panel;

use leptos::prelude::window;

pub use activity_card::ActivityCard;
pub use basket_icon::BasketIcon;
pub use basket_panel::BasketPanel;
pub use day_section::{DaySection, SlotRef};
pub use destinations_view::DestinationsView;
pub use journey_editor::JourneyEditor;
pub use search_panel::SearchPanel;

/// Blocking browser alert
pub(crate) fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::warn!("[APP] alert failed: {:?}", e);
    }
}
