//! Activity Card Component
//!
//! Image + name row used in the basket, search results and day slots.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart, DndSignals};

use crate::components::SlotRef;
use crate::context::AppContext;
use crate::media;
use crate::models::Activity;

/// One activity row
///
/// With `dnd` the row is a drag source carrying the activity id; with
/// `on_remove` it gets a "Retirer" button.
#[component]
pub fn ActivityCard(
    activity: Activity,
    #[prop(default = None)] dnd: Option<DndSignals<SlotRef>>,
    #[prop(default = None)] on_remove: Option<Callback<String>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let placeholder = ctx.placeholder();

    let id = activity.id.clone();
    let name = activity.display_name().to_string();
    let image = if activity.image.trim().is_empty() {
        placeholder.clone()
    } else {
        activity.image.clone()
    };
    let alt = if activity.name.trim().is_empty() { "Activité".to_string() } else { activity.name.clone() };

    let drag_id = id.clone();
    let on_dragstart = move |ev: web_sys::DragEvent| {
        if let Some(dnd) = dnd {
            make_on_dragstart(dnd, drag_id.clone())(ev);
        }
    };
    let on_dragend = move |ev: web_sys::DragEvent| {
        if let Some(dnd) = dnd {
            make_on_dragend(dnd)(ev);
        }
    };

    view! {
        <div
            class="activity"
            data-id=id.clone()
            draggable=if dnd.is_some() { "true" } else { "false" }
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            <img
                src=image
                alt=alt
                on:error=move |ev| media::apply_fallback(&ev, &placeholder)
            />
            <span>{name}</span>
            {on_remove.map(|on_remove| {
                let id = id.clone();
                view! {
                    <button
                        class="remove"
                        type="button"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_remove.run(id.clone());
                        }
                    >
                        "Retirer"
                    </button>
                }
            })}
        </div>
    }
}
