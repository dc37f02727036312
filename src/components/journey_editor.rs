//! Journey Editor Component
//!
//! Multi-day itinerary editor: basket items are dragged into day slots,
//! days are appended on demand, and the whole journey is saved through the
//! persistence bridge.

use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::create_dnd_signals;
use reactive_stores::Store;

use crate::components::day_section::day_anchor;
use crate::components::{alert, BasketIcon, BasketPanel, DaySection, SlotRef};
use crate::context::AppContext;
use crate::persistence::now_millis;
use crate::route;
use crate::store::{
    store_add_day, store_draft, store_load_journey, store_place_activity, EditorState, EditorStateStoreFields, EditorStore,
};

#[component]
pub fn JourneyEditor(
    /// Current `location.pathname`
    pathname: String,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let store: EditorStore = Store::new(EditorState::default());
    let dnd = create_dnd_signals::<SlotRef>();
    let (saving, set_saving) = signal(false);

    let form_attr = ctx.config.with_value(|c| c.journey_id.clone());
    let journey_id = route::editable_id(form_attr.as_deref(), &pathname);
    store.journey_id().set(journey_id.clone());

    // Preload when editing an existing journey
    if let Some(id) = journey_id.clone() {
        spawn_local(async move {
            match ctx.bridge().load(&id).await {
                Some(journey) => {
                    log::info!("[EDITOR] Loaded journey {} ({} days)", id, journey.days.len());
                    ctx.replace_basket(&journey.basket);
                    store_load_journey(&store, &journey);
                }
                None => log::warn!("[EDITOR] Journey {} not found remotely or locally", id),
            }
        });
    }

    // Drop: look the id up in the current basket and place a copy
    let on_drop = Callback::new(move |(id, target): (String, SlotRef)| {
        match ctx.basket_store().find(&id) {
            Some(activity) => {
                store_place_activity(&store, target.day, target.slot, &activity);
            }
            None => log::debug!("[EDITOR] Dropped id {} is not in the basket", id),
        }
    });

    let add_day = move |_| {
        let day = store_add_day(&store);
        log::debug!("[EDITOR] Added day {}", day);
        spawn_local(async move {
            // Let the new section render before scrolling to it
            TimeoutFuture::new(0).await;
            scroll_to(&day_anchor(day));
        });
    };

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        let draft = store_draft(&store);
        let itinerary = store.itinerary().get_untracked();
        let basket = ctx.basket_store().get();
        let placeholder = ctx.placeholder();
        let landing = ctx.config.with_value(|c| c.landing_route.clone());

        set_saving.set(true);
        spawn_local(async move {
            let result = ctx
                .bridge()
                .submit(&draft, &itinerary, &basket, &placeholder, now_millis())
                .await;
            set_saving.set(false);
            match result {
                Err(e) => alert(&e.to_string()),
                Ok(outcome) => {
                    alert(outcome.message());
                    if outcome.is_saved() {
                        if let Err(e) = window().location().set_href(&landing) {
                            log::warn!("[EDITOR] Redirect failed: {:?}", e);
                        }
                    }
                }
            }
        });
    };

    // Ctrl/Cmd+S saves; a click anywhere else closes the floating basket
    let _ = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key().to_lowercase() == "s" {
            ev.prevent_default();
            save();
        }
    });
    let _ = window_event_listener(ev::click, move |_| ctx.close_basket());

    view! {
        <div class="editor-layout">
            <header class="top-bar">
                <h1>{move || if store.journey_id().get().is_some() { "Modifier le voyage" } else { "Nouveau voyage" }}</h1>
                <BasketIcon toggles=true />
            </header>

            <BasketPanel container_id="floatingBasket" dnd=Some(dnd) floating=true />

            <form
                id="createJourneyForm"
                data-id=journey_id
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    save();
                }
            >
                <div class="journey-fields">
                    <input
                        id="journeyName"
                        type="text"
                        placeholder="Nom du voyage"
                        prop:value=move || store.name().get()
                        on:input=move |ev| store.name().set(event_target_value(&ev))
                    />
                    <input
                        id="journeyLocation"
                        type="text"
                        placeholder="Lieu"
                        prop:value=move || store.location().get()
                        on:input=move |ev| store.location().set(event_target_value(&ev))
                    />
                </div>

                <div class="editor-panel" class:dragging=move || dnd.is_dragging()>
                    {move || {
                        store
                            .itinerary()
                            .get()
                            .days()
                            .iter()
                            .cloned()
                            .map(|day| view! { <DaySection day=day dnd=dnd on_drop=on_drop /> })
                            .collect_view()
                    }}
                    <button id="addDayBtn" type="button" class="add-day-btn" on:click=add_day>
                        "+ Ajouter une journée"
                    </button>
                </div>

                <button
                    id="saveJourneyBtn"
                    type="button"
                    class="save-btn"
                    disabled=move || saving.get()
                    on:click=move |_| save()
                >
                    {move || if saving.get() { "Sauvegarde..." } else { "Sauvegarder" }}
                </button>
            </form>
        </div>
    }
}

fn scroll_to(element_id: &str) {
    let Some(el) = document().get_element_by_id(element_id) else {
        return;
    };
    let opts = web_sys::ScrollIntoViewOptions::new();
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    opts.set_block(web_sys::ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}
