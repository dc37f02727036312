//! Search Panel Component
//!
//! Live search against `/search`, each hit addable to the basket.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::search_activities;
use crate::components::alert;
use crate::context::AppContext;
use crate::media;
use crate::models::SearchHit;

#[derive(Clone, Debug, PartialEq)]
enum SearchState {
    Idle,
    Hits(Vec<SearchHit>),
    NoResults,
    Failed,
}

/// `#search` input and `#results` list
#[component]
pub fn SearchPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (state, set_state) = signal(SearchState::Idle);
    // Latest request number; older responses are dropped
    let (generation, set_generation) = signal(0u32);

    let on_input = move |ev: web_sys::Event| {
        let query = event_target_value(&ev);
        let current = generation.get_untracked().wrapping_add(1);
        set_generation.set(current);
        set_state.set(SearchState::Idle);

        if query.trim().is_empty() {
            return;
        }

        spawn_local(async move {
            let api = ctx.api();
            let result = search_activities(&api, &query, &ctx.placeholder()).await;
            if generation.get_untracked() != current {
                log::debug!("[SEARCH] Dropping stale response for '{}'", query);
                return;
            }
            match result {
                Ok(hits) if hits.is_empty() => set_state.set(SearchState::NoResults),
                Ok(hits) => set_state.set(SearchState::Hits(hits)),
                Err(e) => {
                    log::error!("[SEARCH] Search for '{}' failed: {}", query, e);
                    set_state.set(SearchState::Failed);
                }
            }
        });
    };

    let render_hit = move |hit: SearchHit| {
        let placeholder = ctx.placeholder();
        let activity = hit.activity;
        let name = activity.display_name().to_string();
        view! {
            <li class="list-group-item search-hit">
                <img
                    src=activity.image.clone()
                    alt=name.clone()
                    on:error=move |ev| media::apply_fallback(&ev, &placeholder)
                />
                <span class="hit-name">{name.clone()}</span>
                {hit.locality.map(|l| view! { <small class="hit-locality">{l}</small> })}
                <button
                    class="add-btn"
                    type="button"
                    title="Ajouter au panier"
                    on:click=move |_| {
                        if ctx.add_to_basket(&activity) {
                            alert(&format!("{} a été ajouté au panier !", name));
                        }
                    }
                >
                    "➕"
                </button>
            </li>
        }
    };

    view! {
        <div class="search-panel">
            <input
                id="search"
                type="search"
                placeholder="Rechercher une activité, une ville..."
                autocomplete="off"
                on:input=on_input
            />
            <ul id="results" class="list-group">
                {move || match state.get() {
                    SearchState::Idle => ().into_any(),
                    SearchState::NoResults => view! {
                        <li class="list-group-item">"Aucun résultat"</li>
                    }.into_any(),
                    SearchState::Failed => view! {
                        <li class="list-group-item text-danger">"Erreur de chargement"</li>
                    }.into_any(),
                    SearchState::Hits(hits) => hits.into_iter().map(render_hit).collect_view().into_any(),
                }}
            </ul>
        </div>
    }
}
