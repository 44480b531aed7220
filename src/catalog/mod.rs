//! Static food-event catalog.
//!
//! The catalog is a fixed list of [`FoodEvent`] records. Filtering is a pure
//! function of a search string and a category label; the result keeps the
//! order of the source list.
//!
//! ```
//! use treebites::catalog::{filter_events, sample_events, EventQuery};
//!
//! let query = EventQuery::new("pizza", "All");
//! let found = filter_events(sample_events(), &query);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].title, "Pizza Slices");
//! ```

mod data;
pub mod map;

use serde::{Deserialize, Serialize};

/// Category label that matches every event.
pub const ALL_CATEGORY: &str = "All";

/// Category chips, in display order.
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORY,
    "Vegetarian",
    "Vegan / Halal",
    "Dessert",
    "Breakfast",
    "Snack",
    "High Perishability",
];

/// Shown when a query matches nothing.
pub const EMPTY_MESSAGE: &str = "No free food events found";

/// A posting of leftover food somewhere on campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEvent {
    pub id: String,
    pub title: String,
    /// Image URL shown on the card and the map marker.
    pub food_image: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Free-form availability, e.g. "Available for ~40 more minutes".
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
}

impl FoodEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        food_image: impl Into<String>,
        (lat, lng): (f64, f64),
        description: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            food_image: food_image.into(),
            lat,
            lng,
            description: description.into(),
            time: time.into(),
            category: None,
            location_notes: None,
            organizer: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location_notes(mut self, notes: impl Into<String>) -> Self {
        self.location_notes = Some(notes.into());
        self
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }
}

/// The built-in sample events.
pub fn sample_events() -> &'static [FoodEvent] {
    &data::SAMPLE_EVENTS
}

/// Search text plus selected category chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub search: String,
    pub category: String,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORY.to_string(),
        }
    }
}

impl EventQuery {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    /// Query with only a search string.
    pub fn search(search: impl Into<String>) -> Self {
        Self::new(search, ALL_CATEGORY)
    }

    /// Query with only a category.
    pub fn category(category: impl Into<String>) -> Self {
        Self::new("", category)
    }

    pub fn matches(&self, event: &FoodEvent) -> bool {
        matches_search(event, &self.search) && matches_category(event, &self.category)
    }
}

/// Case-insensitive substring match on title, description or organizer.
/// An empty search matches everything.
pub fn matches_search(event: &FoodEvent, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&needle);
    hit(&event.title) || hit(&event.description) || event.organizer.as_deref().is_some_and(hit)
}

/// Exact label match; [`ALL_CATEGORY`] matches everything, including events
/// without a category.
pub fn matches_category(event: &FoodEvent, category: &str) -> bool {
    category == ALL_CATEGORY || event.category.as_deref() == Some(category)
}

/// Events matching `query`, in source order.
pub fn filter_events<'a>(events: &'a [FoodEvent], query: &EventQuery) -> Vec<&'a FoodEvent> {
    let found: Vec<&FoodEvent> = events.iter().filter(|e| query.matches(e)).collect();
    tracing::debug!(
        search = %query.search,
        category = %query.category,
        matched = found.len(),
        "filtered events"
    );
    found
}

pub fn find_by_id<'a>(events: &'a [FoodEvent], id: &str) -> Option<&'a FoodEvent> {
    events.iter().find(|e| e.id == id)
}

/// List header line, e.g. "3 food events found".
pub fn results_label(count: usize) -> String {
    format!("{} food events found", count)
}
