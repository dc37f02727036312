//! Journey endpoint paths

use super::encode_component;

pub const COLLECTION_PATH: &str = "/journeys";
pub const SAVE_PATH: &str = "/journeys/save";

/// `/journeys/{id}` with the id percent-encoded
pub fn item_path(id: &str) -> String {
    format!("{}/{}", COLLECTION_PATH, encode_component(id))
}
