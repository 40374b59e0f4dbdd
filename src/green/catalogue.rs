use crate::api::models::GreenAction;

/// Category tabs: (query value, label).
pub const TABS: &[(&str, &str)] = &[
    ("all", "All Actions"),
    ("energy", "Energy"),
    ("water", "Water"),
    ("waste", "Waste"),
    ("transport", "Transport"),
    ("nature", "Nature"),
];

/// Map a requested tab onto a known one; unknown tabs fall back to "all".
pub fn normalize_tab(raw: &str) -> &'static str {
    let raw = raw.trim().to_lowercase();
    TABS.iter()
        .map(|&(id, _)| id)
        .find(|id| *id == raw)
        .unwrap_or("all")
}

pub fn filter_by_tab(actions: Vec<GreenAction>, tab: &str) -> Vec<GreenAction> {
    if tab == "all" {
        return actions;
    }
    actions
        .into_iter()
        .filter(|a| a.category.to_lowercase() == tab)
        .collect()
}

fn action(title: &str, category: &str, difficulty: &str, description: &str, impact: &str) -> GreenAction {
    GreenAction {
        title: title.to_string(),
        category: category.to_string(),
        difficulty: difficulty.to_string(),
        description: description.to_string(),
        impact: impact.to_string(),
    }
}

/// Catalogue shown when the backend has none to offer.
pub fn fallback_actions() -> Vec<GreenAction> {
    vec![
        action(
            "Switch to LED Bulbs",
            "Energy",
            "Easy",
            "Replace traditional bulbs with energy efficient LED lights throughout your home.",
            "Saves 75% energy, reduces 200kg CO₂/year",
        ),
        action(
            "Collect Rainwater",
            "Water",
            "Medium",
            "Set up rainwater harvesting system for watering plants and gardens.",
            "Saves 500+ litres per month",
        ),
        action(
            "Plant Native Trees",
            "Nature",
            "Medium",
            "Plant indigenous tree species in your community to restore ecosystem.",
            "Absorb 20kg carbon dioxide per tree",
        ),
        action(
            "Start Composting",
            "Waste",
            "Medium",
            "Turn food waste into nutrient-rich compost for gardening.",
            "Diverts 150kg waste from landfills per year",
        ),
        action(
            "Install Solar Panels",
            "Energy",
            "Hard",
            "Generate clean energy by installing solar panels on your roof.",
            "Saves 3,000kgs carbon dioxide per year",
        ),
        action(
            "Fix Water Leaks",
            "Water",
            "Easy",
            "Repair dripping taps and leaking pipes to conserve water.",
            "Saves 20 litres per day",
        ),
        action(
            "Use Public Transport",
            "Transport",
            "Easy",
            "Choose buses, trains, or carpool instead of driving alone.",
            "Reduces 1,000kg carbon dioxide per year",
        ),
        action(
            "Create Wildlife Habitat",
            "Nature",
            "Medium",
            "Plant native flowers and shrubs to support local pollinators and birds.",
            "Supports 50+ species",
        ),
        action(
            "Reduce Plastic Use",
            "Waste",
            "Easy",
            "Use reusable bags, bottles, and containers to minimize plastic waste.",
            "Prevents 100kg plastic waste per year",
        ),
        action(
            "Bike to Work",
            "Transport",
            "Easy",
            "Cycle for short trips instead of driving to reduce emissions.",
            "Saves 500kg CO₂ per year",
        ),
    ]
}
