//! Day Section Component
//!
//! One itinerary day: a title and four slot drop targets.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragleave, make_on_dragover, make_on_drop, DndSignals};

use crate::components::ActivityCard;
use crate::models::{Day, SlotKey};

/// Drop target identity: day number + slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRef {
    pub day: u32,
    pub slot: SlotKey,
}

/// Element id of a day's title, used to scroll to new days
pub fn day_anchor(day: u32) -> String {
    format!("day-{}", day)
}

#[component]
pub fn DaySection(
    day: Day,
    dnd: DndSignals<SlotRef>,
    /// Called with (dragged activity id, target slot)
    on_drop: Callback<(String, SlotRef)>,
) -> impl IntoView {
    let n = day.day;

    let slots = SlotKey::ALL
        .into_iter()
        .map(|key| {
            let target = SlotRef { day: n, slot: key };
            let placed = day.slots.get(key).to_vec();
            view! {
                <div
                    class=move || if dnd.is_over(target) { "slot drag-over" } else { "slot" }
                    id=format!("day{}-{}", n, key.as_str())
                    data-key=key.as_str()
                    on:dragover=make_on_dragover(dnd, target)
                    on:dragleave=make_on_dragleave(dnd, target)
                    on:drop=make_on_drop(dnd, target, move |id, target| on_drop.run((id, target)))
                >
                    <h5>{key.label()}</h5>
                    {placed
                        .into_iter()
                        .map(|activity| view! { <ActivityCard activity=activity /> })
                        .collect_view()}
                </div>
            }
        })
        .collect_view();

    view! {
        <h3 class="day-title" id=day_anchor(n)>{format!("Journée {}", n)}</h3>
        <section class="day-section" data-day=n.to_string()>
            <div class="slots">{slots}</div>
        </section>
    }
}
