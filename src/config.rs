//! Application Configuration
//!
//! Defaults match the deployed site; the host page may override some of
//! them with `data-*` attributes on `<body>`.

use log::LevelFilter;

use crate::media::DEFAULT_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for API routes ("" = same origin)
    pub api_base: String,
    pub placeholder_image: String,
    /// Canonical basket key
    pub basket_key: String,
    /// Key used by older pages, migrated once at startup
    pub legacy_basket_key: String,
    /// Local fallback list of saved journeys
    pub journeys_key: String,
    /// Where the editor goes after a save
    pub landing_route: String,
    /// Editable journey id supplied by the host page
    pub journey_id: Option<String>,
    pub log_level: LevelFilter,
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            placeholder_image: DEFAULT_PLACEHOLDER.to_string(),
            basket_key: "wish_basket_v1".to_string(),
            legacy_basket_key: "basket".to_string(),
            journeys_key: "journeys".to_string(),
            landing_route: "/creation".to_string(),
            journey_id: None,
            log_level: LevelFilter::Info,
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Apply overrides from a lookup of `data-*` attribute values
    pub fn with_overrides(mut self, attr: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| attr(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base) = non_empty("data-api-base") {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(img) = non_empty("data-placeholder-image") {
            self.placeholder_image = img;
        }
        if let Some(level) = non_empty("data-log-level").and_then(|l| l.parse().ok()) {
            self.log_level = level;
        }
        self.journey_id = non_empty("data-journey-id");
        self
    }

    /// Defaults plus overrides from the current document's `<body>`
    pub fn from_document() -> Self {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        match body {
            Some(body) => Self::default().with_overrides(|name| body.get_attribute(name)),
            None => Self::default(),
        }
    }
}
