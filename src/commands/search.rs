//! Search Command
//!
//! Turns raw search rows into display-ready hits.

use serde_json::Value;

use super::{ApiResult, JourneyApi};
use crate::media;
use crate::models::{id_text, Activity, SearchHit};

/// Search activities; a blank query returns nothing without a request
pub async fn search_activities(api: &impl JourneyApi, query: &str, placeholder: &str) -> ApiResult<Vec<SearchHit>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let rows = api.search(query).await?;
    log::debug!("[SEARCH] '{}' -> {} rows", query, rows.len());
    Ok(hits_from_response(&rows, placeholder))
}

/// Rows without a usable id are skipped
pub fn hits_from_response(rows: &[Value], placeholder: &str) -> Vec<SearchHit> {
    rows.iter()
        .filter_map(|row| {
            let id = row.get("id").and_then(id_text).filter(|id| !id.is_empty())?;
            let mut activity: Activity = serde_json::from_value(row.clone()).unwrap_or_default();
            activity.id = id;
            activity.image = media::best_image(row, placeholder);
            let locality = row
                .get("locality")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            Some(SearchHit { activity, locality })
        })
        .collect()
}
