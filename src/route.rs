//! Editor route helpers
//!
//! The editor lives at `/creation` and `/creation/{id}`; `nouveau` in the id
//! position means a new journey.

use std::sync::LazyLock;

use regex::Regex;

/// Id segment meaning "create a new journey"
pub const NEW_JOURNEY_MARKER: &str = "nouveau";

static EDITOR_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)/creation(?:/([^/]+))?/?$").unwrap());

pub fn is_editor_path(pathname: &str) -> bool {
    EDITOR_PATH.is_match(pathname)
}

/// Id segment of an editor path, unless absent or `nouveau`
pub fn id_from_path(pathname: &str) -> Option<String> {
    EDITOR_PATH
        .captures(pathname)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| id != NEW_JOURNEY_MARKER)
}

/// Journey being edited: the form attribute wins over the URL
pub fn editable_id(form_attr: Option<&str>, pathname: &str) -> Option<String> {
    form_attr
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| id_from_path(pathname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_paths() {
        assert!(is_editor_path("/creation"));
        assert!(is_editor_path("/Creation/abc"));
        assert!(!is_editor_path("/creation/abc/day/2"));
        assert!(!is_editor_path("/destinations"));
    }

    #[test]
    fn test_trailing_slash_is_still_the_editor() {
        assert!(is_editor_path("/creation/"));
        assert!(is_editor_path("/creation/abc/"));
        assert_eq!(id_from_path("/creation/"), None);
        assert_eq!(id_from_path("/creation/abc/"), Some("abc".to_string()));
        assert_eq!(id_from_path("/creation/nouveau/"), None);
    }

    #[test]
    fn test_id_from_path() {
        assert_eq!(id_from_path("/creation/abc"), Some("abc".to_string()));
        assert_eq!(id_from_path("/creation/nouveau"), None);
        assert_eq!(id_from_path("/creation"), None);
        assert_eq!(id_from_path("/region/abc"), None);
    }

    #[test]
    fn test_form_attribute_wins() {
        assert_eq!(editable_id(Some("f1"), "/creation/abc"), Some("f1".to_string()));
        assert_eq!(editable_id(Some(""), "/creation/abc"), Some("abc".to_string()));
        assert_eq!(editable_id(None, "/creation/nouveau"), None);
    }
}
