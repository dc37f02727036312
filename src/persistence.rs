//! Persistence Bridge
//!
//! Saves and loads journeys through the remote API, falling back to the
//! local journey archive whenever the API does not answer with a
//! recognized success shape.

use chrono::Utc;
use serde_json::Value;

use crate::commands::{ApiResult, JourneyApi};
use crate::itinerary::{validate_name, Itinerary, JourneyDraft, SaveError};
use crate::models::{id_text, is_success_response, Activity, Journey};
use crate::storage::{JourneyArchive, StorageBackend};

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Where a save ended up
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Accepted by the API (id as reported, when any)
    Remote { id: Option<String> },
    /// Stored in the browser only
    Local { id: String },
    /// Neither the API nor local storage accepted it
    Failed,
}

impl SaveOutcome {
    /// Confirmation shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Remote { .. } => "Voyage sauvegardé !",
            SaveOutcome::Local { .. } => "Voyage sauvegardé (local) !",
            SaveOutcome::Failed => "Impossible de sauvegarder le voyage.",
        }
    }

    pub fn is_saved(&self) -> bool {
        !matches!(self, SaveOutcome::Failed)
    }
}

pub struct PersistenceBridge<A: JourneyApi, S: StorageBackend> {
    api: A,
    archive: JourneyArchive<S>,
}

impl<A: JourneyApi, S: StorageBackend> PersistenceBridge<A, S> {
    pub fn new(api: A, archive: JourneyArchive<S>) -> Self {
        Self { api, archive }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Try the endpoint chain, then the local archive
    pub async fn save(&self, journey: &Journey, now_ms: i64) -> SaveOutcome {
        let remote = match journey.id.as_deref() {
            Some(id) => {
                first_success(
                    self.api.update_journey(id, journey).await,
                    || self.api.save_journey(journey),
                )
                .await
            }
            None => {
                first_success(
                    self.api.save_journey(journey).await,
                    || self.api.create_journey(journey),
                )
                .await
            }
        };

        if let Some(body) = remote {
            let id = body.get("id").and_then(id_text).or_else(|| journey.id.clone());
            log::info!("[SAVE] Saved remotely (id={:?})", id);
            return SaveOutcome::Remote { id };
        }

        log::warn!("[SAVE] API unavailable or response not recognized, saving locally");
        match self.archive.upsert(journey, now_ms) {
            Ok(id) => {
                log::info!("[SAVE] Saved locally as {}", id);
                SaveOutcome::Local { id }
            }
            Err(e) => {
                log::error!("[SAVE] Local save failed: {}", e);
                SaveOutcome::Failed
            }
        }
    }

    /// Remote journey, else the locally archived one
    pub async fn load(&self, id: &str) -> Option<Journey> {
        match self.api.fetch_journey(id).await {
            Ok(body) => match serde_json::from_value::<Journey>(body) {
                Ok(journey) => return Some(journey),
                Err(e) => log::warn!("[EDITOR] Journey {} has an unexpected shape: {}", id, e),
            },
            Err(e) => log::warn!("[EDITOR] Remote preload of {} failed: {}", id, e),
        }
        log::info!("[EDITOR] Falling back to local journeys for {}", id);
        self.archive.find(id)
    }

    /// Validate, serialize and save the editor contents
    ///
    /// Nothing is sent or stored when the name is blank.
    pub async fn submit(
        &self,
        draft: &JourneyDraft,
        itinerary: &Itinerary,
        basket: &[Activity],
        placeholder: &str,
        now_ms: i64,
    ) -> Result<SaveOutcome, SaveError> {
        let name = validate_name(&draft.name)?;
        let draft = JourneyDraft { name, ..draft.clone() };
        let journey = itinerary.to_journey(&draft, basket, placeholder, now_ms);
        Ok(self.save(&journey, now_ms).await)
    }
}

/// First response carrying a success marker; the fallback runs only when needed
async fn first_success<F, Fut>(first: ApiResult<Value>, fallback: F) -> Option<Value>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = ApiResult<Value>>,
{
    match first {
        Ok(body) if is_success_response(&body) => return Some(body),
        Ok(body) => log::warn!("[SAVE] Unrecognized response: {}", body),
        Err(e) => log::warn!("[SAVE] Request failed: {}", e),
    }
    match fallback().await {
        Ok(body) if is_success_response(&body) => Some(body),
        Ok(body) => {
            log::warn!("[SAVE] Unrecognized fallback response: {}", body);
            None
        }
        Err(e) => {
            log::warn!("[SAVE] Fallback request failed: {}", e);
            None
        }
    }
}
