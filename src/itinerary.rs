//! Itinerary Model
//!
//! In-memory source of truth for the editor: ordered days, each with four
//! slot lists. Rendering is a projection of this model; saving serializes it
//! into a [`Journey`] payload and preloading rebuilds it from one.

use thiserror::Error;

use crate::models::{Activity, Day, DaySlots, Journey, SlotKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Veuillez saisir un nom de voyage")]
    MissingName,
}

/// Trimmed journey name, rejecting blank input
pub fn validate_name(name: &str) -> Result<String, SaveError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SaveError::MissingName);
    }
    Ok(name.to_string())
}

/// Form fields that accompany the itinerary on save
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyDraft {
    pub id: Option<String>,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    days: Vec<Day>,
}

impl Default for Itinerary {
    fn default() -> Self {
        Self { days: vec![Day::empty(1)] }
    }
}

impl Itinerary {
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Append the next day; returns its 1-based number
    pub fn add_day(&mut self) -> u32 {
        let next = self.days.len() as u32 + 1;
        self.days.push(Day::empty(next));
        next
    }

    /// Append a copy of `activity` to a slot; false when the day is unknown
    pub fn place(&mut self, day: u32, slot: SlotKey, activity: &Activity) -> bool {
        match self.days.iter_mut().find(|d| d.day == day) {
            Some(d) => {
                d.slots.get_mut(slot).push(activity.slot_copy());
                true
            }
            None => false,
        }
    }

    /// Rebuild from a saved journey: `days` when present, else legacy `slots`
    pub fn from_journey(journey: &Journey) -> Self {
        if journey.days.is_empty() {
            return Self {
                days: vec![Day { day: 1, slots: journey.slots.clone() }],
            };
        }
        let days = journey
            .days
            .iter()
            .enumerate()
            .map(|(i, d)| Day { day: i as u32 + 1, slots: d.slots.clone() })
            .collect();
        Self { days }
    }

    /// First placed image, else first basket image, else the placeholder
    pub fn cover_image(&self, basket: &[Activity], placeholder: &str) -> String {
        self.days
            .iter()
            .flat_map(|d| d.slots.iter())
            .chain(basket.iter())
            .map(|a| a.image.trim())
            .find(|img| !img.is_empty())
            .unwrap_or(placeholder)
            .to_string()
    }

    /// Serialize into the save payload
    pub fn to_journey(&self, draft: &JourneyDraft, basket: &[Activity], placeholder: &str, now_ms: i64) -> Journey {
        let days: Vec<Day> = self
            .days
            .iter()
            .map(|d| Day { day: d.day, slots: with_image_defaults(&d.slots, placeholder) })
            .collect();
        let days_json = serde_json::to_string(&days).unwrap_or_else(|_| "[]".to_string());
        let slots = days.first().map(|d| d.slots.clone()).unwrap_or_default();

        Journey {
            id: draft.id.clone().filter(|id| !id.is_empty()),
            name: draft.name.clone(),
            location: draft.location.trim().to_string(),
            image: self.cover_image(basket, placeholder),
            basket: basket.to_vec(),
            days,
            days_json,
            slots,
            updated_at: now_ms,
        }
    }
}

fn with_image_defaults(slots: &DaySlots, placeholder: &str) -> DaySlots {
    let mut out = slots.clone();
    for key in SlotKey::ALL {
        for a in out.get_mut(key).iter_mut() {
            if a.image.trim().is_empty() {
                a.image = placeholder.to_string();
            }
            if a.name.trim().is_empty() {
                a.name = "Sans nom".to_string();
            }
        }
    }
    out
}
