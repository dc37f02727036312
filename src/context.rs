//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::basket::{BasketStore, Migration};
use crate::commands::HttpApi;
use crate::config::AppConfig;
use crate::models::Activity;
use crate::persistence::PersistenceBridge;
use crate::storage::{BrowserStorage, JourneyArchive};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Startup configuration
    pub config: StoredValue<AppConfig>,
    /// Basket contents mirrored from storage - read
    pub basket: ReadSignal<Vec<Activity>>,
    /// Basket contents mirrored from storage - write
    set_basket: WriteSignal<Vec<Activity>>,
    /// Floating basket visibility - read
    pub basket_open: ReadSignal<bool>,
    /// Floating basket visibility - write
    set_basket_open: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        basket: (ReadSignal<Vec<Activity>>, WriteSignal<Vec<Activity>>),
        basket_open: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            config: StoredValue::new(config),
            basket: basket.0,
            set_basket: basket.1,
            basket_open: basket_open.0,
            set_basket_open: basket_open.1,
        }
    }

    pub fn placeholder(&self) -> String {
        self.config.with_value(|c| c.placeholder_image.clone())
    }

    pub fn basket_key(&self) -> String {
        self.config.with_value(|c| c.basket_key.clone())
    }

    /// Store bound to `localStorage`; every change refreshes the basket signal
    pub fn basket_store(&self) -> BasketStore<BrowserStorage> {
        let set_basket = self.set_basket;
        let (key, placeholder) = self.config.with_value(|c| (c.basket_key.clone(), c.placeholder_image.clone()));
        BasketStore::new(BrowserStorage, key, placeholder)
            .with_listener(Arc::new(move |items: &[Activity]| set_basket.set(items.to_vec())))
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.config.with_value(|c| c.api_base.clone()))
    }

    pub fn bridge(&self) -> PersistenceBridge<HttpApi, BrowserStorage> {
        let key = self.config.with_value(|c| c.journeys_key.clone());
        PersistenceBridge::new(self.api(), JourneyArchive::new(BrowserStorage, key))
    }

    /// Run the legacy key migration (once, at startup)
    pub fn migrate_basket(&self) -> Migration {
        let legacy = self.config.with_value(|c| c.legacy_basket_key.clone());
        self.basket_store().migrate_legacy(&legacy)
    }

    /// Re-read the basket from storage
    pub fn refresh_basket(&self) {
        self.set_basket.set(self.basket_store().get());
    }

    /// Returns true when the activity was not already in the basket
    pub fn add_to_basket(&self, activity: &Activity) -> bool {
        match self.basket_store().add(activity) {
            Ok(added) => added,
            Err(e) => {
                log::warn!("[BASKET] Add failed: {}", e);
                false
            }
        }
    }

    pub fn remove_from_basket(&self, id: &str) {
        if let Err(e) = self.basket_store().remove(id) {
            log::warn!("[BASKET] Remove failed: {}", e);
        }
    }

    pub fn replace_basket(&self, items: &[Activity]) {
        if let Err(e) = self.basket_store().set(items) {
            log::warn!("[BASKET] Replace failed: {}", e);
        }
    }

    pub fn toggle_basket(&self) {
        self.set_basket_open.update(|open| *open = !*open);
    }

    pub fn close_basket(&self) {
        if self.basket_open.get_untracked() {
            self.set_basket_open.set(false);
        }
    }
}
