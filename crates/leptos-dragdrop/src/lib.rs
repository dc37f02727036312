//! Leptos DragDrop Utilities
//!
//! Native HTML5 drag-and-drop for Leptos.
//! Sources carry a string payload in the `DataTransfer`; targets are any
//! `Copy` value the caller uses to identify a drop location.

use leptos::prelude::*;

/// `DataTransfer` format used for the payload
pub const PAYLOAD_FORMAT: &str = "id";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals<T: Send + Sync + 'static> {
    /// Payload of the element being dragged, if the drag started on this page
    pub dragging_read: ReadSignal<Option<String>>,
    pub dragging_write: WriteSignal<Option<String>>,
    /// Target currently hovered
    pub over_read: ReadSignal<Option<T>>,
    pub over_write: WriteSignal<Option<T>>,
}

pub fn create_dnd_signals<T>() -> DndSignals<T>
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    let (dragging_read, dragging_write) = signal(None::<String>);
    let (over_read, over_write) = signal(None::<T>);
    DndSignals {
        dragging_read,
        dragging_write,
        over_read,
        over_write,
    }
}

impl<T> DndSignals<T>
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    /// Whether `target` is the hovered drop target
    pub fn is_over(&self, target: T) -> bool {
        self.over_read.get() == Some(target)
    }

    /// Whether a page-local drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging_read.get().is_some()
    }
}

/// End drag operation
pub fn end_drag<T>(dnd: &DndSignals<T>)
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    dnd.dragging_write.set(None);
    dnd.over_write.set(None);
}

/// Create dragstart handler for a draggable source carrying `payload`
pub fn make_on_dragstart<T>(dnd: DndSignals<T>, payload: String) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(PAYLOAD_FORMAT, &payload);
            dt.set_effect_allowed("move");
        }
        dnd.dragging_write.set(Some(payload.clone()));
    }
}

/// Create dragend handler for sources (fires after drop or cancel)
pub fn make_on_dragend<T>(dnd: DndSignals<T>) -> impl Fn(web_sys::DragEvent) + Copy + 'static
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::DragEvent| end_drag(&dnd)
}

/// Create dragover handler for a target; accepting the drop requires `prevent_default`
pub fn make_on_dragover<T>(dnd: DndSignals<T>, target: T) -> impl Fn(web_sys::DragEvent) + Copy + 'static
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
        if dnd.over_read.get_untracked() != Some(target) {
            dnd.over_write.set(Some(target));
        }
    }
}

/// Create dragleave handler for a target
pub fn make_on_dragleave<T>(dnd: DndSignals<T>, target: T) -> impl Fn(web_sys::DragEvent) + Copy + 'static
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::DragEvent| {
        if dnd.over_read.get_untracked() == Some(target) {
            dnd.over_write.set(None);
        }
    }
}

/// Create drop handler for a target
///
/// The payload comes from the `DataTransfer` first (drags from other
/// documents), then from the page-local dragging signal.
pub fn make_on_drop<T, F>(dnd: DndSignals<T>, target: T, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    T: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(String, T) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let from_transfer = ev
            .data_transfer()
            .and_then(|dt| dt.get_data(PAYLOAD_FORMAT).ok())
            .filter(|s| !s.is_empty());
        let payload = from_transfer.or_else(|| dnd.dragging_read.get_untracked());
        end_drag(&dnd);
        if let Some(payload) = payload {
            on_drop(payload, target);
        }
    }
}
