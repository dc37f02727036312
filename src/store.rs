//! Editor State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::itinerary::{Itinerary, JourneyDraft};
use crate::models::{Activity, Journey, SlotKey};

/// Itinerary editor state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct EditorState {
    /// Journey being edited (None = new journey)
    pub journey_id: Option<String>,
    pub name: String,
    pub location: String,
    pub itinerary: Itinerary,
}

/// Type alias for the store
pub type EditorStore = Store<EditorState>;

// ========================
// Store Helper Functions
// ========================

/// Append a day, returning its number
pub fn store_add_day(store: &EditorStore) -> u32 {
    store.itinerary().write().add_day()
}

/// Place a copy of `activity` into a day slot
pub fn store_place_activity(store: &EditorStore, day: u32, slot: SlotKey, activity: &Activity) -> bool {
    store.itinerary().write().place(day, slot, activity)
}

/// Replace form fields and days with a saved journey
pub fn store_load_journey(store: &EditorStore, journey: &Journey) {
    store.name().set(journey.name.clone());
    store.location().set(journey.location.clone());
    store.itinerary().set(Itinerary::from_journey(journey));
}

/// Current form fields, untracked
pub fn store_draft(store: &EditorStore) -> JourneyDraft {
    JourneyDraft {
        id: store.journey_id().get_untracked(),
        name: store.name().get_untracked(),
        location: store.location().get_untracked(),
    }
}
