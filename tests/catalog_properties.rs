//! Catalog filter and map placement through the public API.

use treebites::catalog::map::{self, MapView, CAMPUS_CENTER};
use treebites::catalog::{
    filter_events, find_by_id, sample_events, EventQuery, FoodEvent, ALL_CATEGORY, CATEGORIES,
};

fn ids(found: &[&FoodEvent]) -> Vec<String> {
    found.iter().map(|e| e.id.clone()).collect()
}

/// Filter by category, then filter that result by search.
fn category_then_search(search: &str, category: &str) -> Vec<String> {
    let by_category: Vec<FoodEvent> = filter_events(sample_events(), &EventQuery::category(category))
        .into_iter()
        .cloned()
        .collect();
    ids(&filter_events(&by_category, &EventQuery::search(search)))
}

/// Filter by search, then filter that result by category.
fn search_then_category(search: &str, category: &str) -> Vec<String> {
    let by_search: Vec<FoodEvent> = filter_events(sample_events(), &EventQuery::search(search))
        .into_iter()
        .cloned()
        .collect();
    ids(&filter_events(&by_search, &EventQuery::category(category)))
}

#[test]
fn test_filter_steps_commute() {
    let searches = ["", "a", "veggie", "OLD UNION", "cheese", "zzz", "s"];
    let mut categories: Vec<&str> = CATEGORIES.to_vec();
    categories.extend(["Low Supply", "Vegetarian / Halal", "Nonexistent"]);

    for search in searches {
        for category in &categories {
            let combined = ids(&filter_events(sample_events(), &EventQuery::new(search, *category)));
            assert_eq!(category_then_search(search, category), combined, "{:?} / {:?}", search, category);
            assert_eq!(search_then_category(search, category), combined, "{:?} / {:?}", search, category);
        }
    }
}

#[test]
fn test_all_category_is_identity() {
    let all = filter_events(sample_events(), &EventQuery::new("", ALL_CATEGORY));
    assert_eq!(all.len(), sample_events().len());
    assert!(all.iter().zip(sample_events()).all(|(a, b)| a.id == b.id));
}

#[test]
fn test_filter_preserves_source_order() {
    let found = filter_events(sample_events(), &EventQuery::search("e"));
    let positions: Vec<usize> = found
        .iter()
        .map(|e| sample_events().iter().position(|s| s.id == e.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_chip_except_all_is_a_real_category() {
    for chip in CATEGORIES.iter().filter(|c| **c != ALL_CATEGORY) {
        assert!(
            !filter_events(sample_events(), &EventQuery::category(*chip)).is_empty(),
            "chip {:?} matches nothing",
            chip
        );
    }
}

#[test]
fn test_lookup_and_json() {
    let event = find_by_id(sample_events(), "4").unwrap();
    let json = serde_json::to_string(event).unwrap();
    let back: FoodEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, event);
}

#[test]
fn test_markers_near_campus_centre() {
    let view = MapView::default();
    let events: Vec<&FoodEvent> = sample_events().iter().collect();
    for m in map::place_markers(&view, &events) {
        // Every sample event is within a few hundred pixels of the centre at zoom 16.
        assert!((m.left + 32.0 - 400.0).abs() < 800.0, "{:?}", m);
        assert!((m.top + 64.0 - 250.0).abs() < 800.0, "{:?}", m);
    }
    assert_eq!(map::tile_for(CAMPUS_CENTER, view.zoom).z, 16);
}

#[test]
fn test_static_layout_follows_filter() {
    let found = filter_events(sample_events(), &EventQuery::category("Dessert"));
    let placed = map::static_positions(&found);
    assert_eq!(placed.len(), 1);
    assert_eq!((placed[0].x_percent, placed[0].y_percent), (50.0, 50.0));
}
