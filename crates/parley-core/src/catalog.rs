use crate::error::{ParleyError, Result};
use crate::models::{Difficulty, Scenario};

// ── Scenario data ─────────────────────────────────────────────────────────────

/// The build-time scenario catalog, in carousel display order.
const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "job-interview",
        title: "Job Interview",
        description: "Practice common interview questions and refine your \
                      professional English communication skills.",
        difficulty: Difficulty::Medium,
        duration_minutes: 10,
        premium: false,
        image: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2",
    },
    Scenario {
        id: "coffee-shop",
        title: "Ordering Coffee",
        description: "Master everyday phrases for ordering at cafes and casual \
                      conversations with baristas.",
        difficulty: Difficulty::Easy,
        duration_minutes: 5,
        premium: false,
        image: "https://images.unsplash.com/photo-1511920170033-f8396924c348",
    },
    Scenario {
        id: "debate-club",
        title: "Debate Club",
        description: "Develop persuasive language skills and learn to \
                      articulate complex arguments clearly.",
        difficulty: Difficulty::Hard,
        duration_minutes: 15,
        premium: true,
        image: "https://images.unsplash.com/photo-1591115765373-5207764f72e7",
    },
    Scenario {
        id: "travel-planning",
        title: "Travel Planning",
        description: "Practice discussing destinations, booking accommodations, \
                      and handling travel inquiries.",
        difficulty: Difficulty::Medium,
        duration_minutes: 10,
        premium: false,
        image: "https://images.unsplash.com/photo-1488646953014-85cb44e25828",
    },
    Scenario {
        id: "restaurant-reservation",
        title: "Restaurant Reservation",
        description: "Learn to make reservations, order food, and navigate \
                      restaurant conversations confidently.",
        difficulty: Difficulty::Easy,
        duration_minutes: 5,
        premium: false,
        image: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4",
    },
];

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Registry over the static scenario table with lookup helpers.
pub struct Catalog;

impl Catalog {
    /// All scenarios in carousel display order.
    pub fn all() -> &'static [Scenario] {
        SCENARIOS
    }

    /// Number of catalog entries.
    pub fn len() -> usize {
        SCENARIOS.len()
    }

    /// `true` when the catalog has no entries (never, in practice).
    pub fn is_empty() -> bool {
        SCENARIOS.is_empty()
    }

    /// Look up a scenario by its stable identifier.
    pub fn get(id: &str) -> Option<&'static Scenario> {
        SCENARIOS.iter().find(|s| s.id == id)
    }

    /// Look up a scenario by id, erroring on an unknown identifier.
    pub fn require(id: &str) -> Result<&'static Scenario> {
        Self::get(id).ok_or_else(|| ParleyError::UnknownScenario(id.to_string()))
    }

    /// Returns `true` if `id` names a catalog entry.
    pub fn is_valid_id(id: &str) -> bool {
        Self::get(id).is_some()
    }
}
