use once_cell::sync::Lazy;

use super::FoodEvent;

/// Sample events around the Stanford campus.
pub(super) static SAMPLE_EVENTS: Lazy<Vec<FoodEvent>> = Lazy::new(|| {
    vec![
        FoodEvent::new(
            "1",
            "Leftover Burrito Bowls",
            "https://images.unsplash.com/photo-1600891964599-f61ba0e24092?w=400&q=80",
            (37.4275, -122.1770),
            "Chicken and veggie burrito bowls from our CS Club meeting. Still warm!",
            "Available for ~40 more minutes",
        )
        .with_category("High Perishability")
        .with_location_notes("Third floor lounge, near the elevators at Huang Engineering Center")
        .with_organizer("Stanford CS Club"),
        FoodEvent::new(
            "2",
            "Veggie Sushi Platters",
            "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&q=80",
            (37.4300, -122.1730),
            "Assorted veggie sushi from a recruiting event. All vegetarian!",
            "Available for ~30 more minutes",
        )
        .with_category("Vegetarian")
        .with_location_notes("First floor commons at Gates Computer Science")
        .with_organizer("Gates Hall"),
        FoodEvent::new(
            "3",
            "Pizza Slices",
            "https://images.unsplash.com/photo-1513104890138-7c749659a591?w=400&q=80",
            (37.4265, -122.1698),
            "Cheese and veggie pizza from study session, still plenty left.",
            "Available until 6:30 PM",
        )
        .with_category("Low Supply")
        .with_location_notes("Second floor lounge, Old Union")
        .with_organizer("Old Union"),
        FoodEvent::new(
            "4",
            "Mediterranean Plates",
            "https://images.unsplash.com/photo-1551218808-94e220e084d2?w=400&q=80",
            (37.4290, -122.1750),
            "Falafel, hummus, pita, and salads. Vegan and halal options available.",
            "Available for ~45 more minutes",
        )
        .with_category("Vegan / Halal")
        .with_location_notes("Outdoor tables near C wing entrance, EVGR C Courtyard")
        .with_organizer("EVGR Events"),
        FoodEvent::new(
            "5",
            "Cookies & Milk",
            "https://images.unsplash.com/photo-1509440159596-0249088772ff?w=400&q=80",
            (37.4255, -122.1691),
            "Freshly baked chocolate chip and oatmeal cookies with cold milk.",
            "Available for ~90 more minutes",
        )
        .with_category("Dessert")
        .with_location_notes("Main lobby near Starbucks, Tresidder Union")
        .with_organizer("Tresidder Union"),
        FoodEvent::new(
            "6",
            "Paneer Tikka & Rice",
            "https://images.unsplash.com/photo-1604908177445-02f0b6a41e76?w=400&q=80",
            (37.4268, -122.1735),
            "Indian vegetarian feast with paneer tikka, rice, and naan.",
            "Available for ~20 more minutes",
        )
        .with_category("Vegetarian / Halal")
        .with_location_notes("Ground floor atrium, Y2E2 Building")
        .with_organizer("Y2E2 Study Group"),
        FoodEvent::new(
            "7",
            "Bagels & Cream Cheese",
            "https://images.unsplash.com/photo-1612874742237-6526221588e5?w=400&q=80",
            (37.4270, -122.1680),
            "Assorted bagels with cream cheese and spreads. Help yourself!",
            "Available for ~30 more minutes",
        )
        .with_category("Breakfast")
        .with_location_notes("Near the fountain at Memorial Court")
        .with_organizer("Old Union"),
        FoodEvent::new(
            "8",
            "Fruit & Cheese Platter",
            "https://images.unsplash.com/photo-1556912998-6e2f5f64b934?w=400&q=80",
            (37.4310, -122.1665),
            "Fresh fruit, cheese cubes, and crackers.",
            "Available for ~1 hour",
        )
        .with_category("Snack")
        .with_location_notes("Sigma Chi house, front porch, Fraternity Row")
        .with_organizer("Fraternity Row"),
    ]
});
