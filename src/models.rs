//! Frontend Models
//!
//! Wire shapes exchanged with the journeys API and kept in local storage.
//! Deserialization is lenient: the API and older local data disagree on
//! id types, nullable fields and JSON-encoded sub-documents.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Activity reference (point of interest placed in the basket or a slot)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(deserialize_with = "de::id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub image: String,
    #[serde(default, deserialize_with = "de::string_list", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl Activity {
    /// Copy stored in a slot: identity and display fields only
    pub fn slot_copy(&self) -> Activity {
        Activity {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            types: Vec::new(),
        }
    }

    /// Display name, with the French default for unnamed entries
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Sans nom"
        } else {
            &self.name
        }
    }
}

/// One search result row
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub activity: Activity,
    pub locality: Option<String>,
}

/// Fixed daily time slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Morning,
    Noon,
    Afternoon,
    Evening,
}

impl SlotKey {
    pub const ALL: [SlotKey; 4] = [SlotKey::Morning, SlotKey::Noon, SlotKey::Afternoon, SlotKey::Evening];

    /// Wire name, also used as the `data-key` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Morning => "morning",
            SlotKey::Noon => "noon",
            SlotKey::Afternoon => "afternoon",
            SlotKey::Evening => "evening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotKey::Morning => "Matinée",
            SlotKey::Noon => "Midi",
            SlotKey::Afternoon => "Après-midi",
            SlotKey::Evening => "Soirée",
        }
    }

    pub fn parse(key: &str) -> Option<SlotKey> {
        SlotKey::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Activities of one day, per slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DaySlots {
    #[serde(default, deserialize_with = "de::activity_list")]
    pub morning: Vec<Activity>,
    #[serde(default, deserialize_with = "de::activity_list")]
    pub noon: Vec<Activity>,
    #[serde(default, deserialize_with = "de::activity_list")]
    pub afternoon: Vec<Activity>,
    #[serde(default, deserialize_with = "de::activity_list")]
    pub evening: Vec<Activity>,
}

impl DaySlots {
    pub fn get(&self, key: SlotKey) -> &[Activity] {
        match key {
            SlotKey::Morning => &self.morning,
            SlotKey::Noon => &self.noon,
            SlotKey::Afternoon => &self.afternoon,
            SlotKey::Evening => &self.evening,
        }
    }

    pub fn get_mut(&mut self, key: SlotKey) -> &mut Vec<Activity> {
        match key {
            SlotKey::Morning => &mut self.morning,
            SlotKey::Noon => &mut self.noon,
            SlotKey::Afternoon => &mut self.afternoon,
            SlotKey::Evening => &mut self.evening,
        }
    }

    /// All activities in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        SlotKey::ALL.into_iter().flat_map(move |k| self.get(k).iter())
    }

    /// Lenient conversion from any JSON value (object, JSON text, or junk)
    pub fn from_value(value: &Value) -> DaySlots {
        match de::unwrap_json_text(value) {
            Some(v @ Value::Object(_)) => serde_json::from_value(v).unwrap_or_default(),
            _ => DaySlots::default(),
        }
    }
}

/// One itinerary day (1-indexed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default, deserialize_with = "de::u32_or_zero")]
    pub day: u32,
    #[serde(default, deserialize_with = "de::day_slots")]
    pub slots: DaySlots,
}

impl Day {
    pub fn empty(day: u32) -> Self {
        Self { day, slots: DaySlots::default() }
    }
}

/// Saved multi-day itinerary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Journey {
    #[serde(default, deserialize_with = "de::optional_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub image: String,
    #[serde(default, deserialize_with = "de::activity_list")]
    pub basket: Vec<Activity>,
    #[serde(default, deserialize_with = "de::day_list")]
    pub days: Vec<Day>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub days_json: String,
    /// Mirror of the first day, for readers of the single-day schema
    #[serde(default, deserialize_with = "de::day_slots")]
    pub slots: DaySlots,
    #[serde(default, rename = "updatedAt", deserialize_with = "de::i64_or_zero")]
    pub updated_at: i64,
}

/// Whether a save endpoint's JSON body reports success
pub fn is_success_response(body: &Value) -> bool {
    let status_ok = matches!(body.get("status").and_then(Value::as_str), Some("ok") | Some("updated"));
    status_ok || body.get("id").map(is_truthy).unwrap_or(false)
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Id of a JSON value compared as text (`"12"` and `12` are the same id)
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lenient field deserializers
mod de {
    use super::*;

    pub fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(id_text(&v).unwrap_or_default())
    }

    pub fn optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(id_text(&v).filter(|s| !s.is_empty()))
    }

    pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            _ => Ok(String::new()),
        }
    }

    pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(vec![s]),
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    pub fn u32_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let v = Value::deserialize(d)?;
        let n = match &v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        Ok(n.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
    }

    pub fn i64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match Value::deserialize(d)? {
            Value::Number(n) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0)),
            _ => Ok(0),
        }
    }

    /// Parse a string holding JSON; pass other values through
    pub fn unwrap_json_text(value: &Value) -> Option<Value> {
        match value {
            Value::String(s) => serde_json::from_str(s).ok(),
            Value::Null => None,
            other => Some(other.clone()),
        }
    }

    pub fn activity_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Activity>, D::Error> {
        match Value::deserialize(d)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|v| serde_json::from_value::<Activity>(v).ok())
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    pub fn day_slots<'de, D: Deserializer<'de>>(d: D) -> Result<DaySlots, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(DaySlots::from_value(&v))
    }

    pub fn day_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Day>, D::Error> {
        let v = Value::deserialize(d)?;
        match unwrap_json_text(&v) {
            Some(Value::Array(items)) => Ok(items
                .into_iter()
                .filter_map(|v| serde_json::from_value::<Day>(v).ok())
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}
