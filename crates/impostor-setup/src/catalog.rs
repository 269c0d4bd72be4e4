//! The word catalog: named pools of candidate secret words.
//!
//! Loaded once at startup and shared read-only (behind an `Arc`) by the
//! configurator. Order matters only for display; every draw is uniform.

use impostor_model::{Codec, ModelError};
use serde::{Deserialize, Serialize};

/// A named pool of candidate secret words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn new<I, W>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

/// Ordered set of categories, keyed by name.
///
/// Serialized as a plain JSON array of `{ "name", "words" }` objects so a
/// custom catalog can be written by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCatalog {
    categories: Vec<Category>,
}

impl WordCatalog {
    /// Builds a catalog. Later entries with an already-seen name are
    /// dropped so lookups by name stay unambiguous.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if unique.iter().any(|c| c.name == category.name) {
                tracing::warn!(category = %category.name, "duplicate category dropped");
                continue;
            }
            unique.push(category);
        }
        Self { categories: unique }
    }

    /// Decodes a catalog written as a JSON (or other codec) array.
    pub fn decode<C: Codec>(codec: &C, data: &[u8]) -> Result<Self, ModelError> {
        let categories: Vec<Category> = codec.decode(data)?;
        Ok(Self::new(categories))
    }

    /// The catalog shipped with the game.
    pub fn builtin() -> Self {
        Self::new(vec![
            Category::new(
                "Animals",
                [
                    "Cat", "Dog", "Elephant", "Giraffe", "Penguin", "Dolphin", "Lion", "Owl",
                    "Kangaroo", "Octopus",
                ],
            ),
            Category::new(
                "Food",
                [
                    "Pizza", "Sushi", "Taco", "Pancake", "Lasagna", "Burger", "Paella", "Croissant",
                    "Curry", "Omelette",
                ],
            ),
            Category::new(
                "Places",
                [
                    "Beach", "Hospital", "Airport", "Library", "Museum", "Casino", "Prison",
                    "Stadium", "Cinema", "Supermarket",
                ],
            ),
            Category::new(
                "Professions",
                [
                    "Doctor", "Firefighter", "Chef", "Pilot", "Teacher", "Astronaut", "Plumber",
                    "Lawyer", "Farmer", "Magician",
                ],
            ),
            Category::new(
                "Sports",
                [
                    "Football", "Tennis", "Basketball", "Swimming", "Boxing", "Golf", "Surfing",
                    "Chess", "Cycling", "Volleyball",
                ],
            ),
            Category::new(
                "Objects",
                [
                    "Umbrella", "Mirror", "Scissors", "Candle", "Backpack", "Clock", "Pillow",
                    "Guitar", "Ladder", "Toothbrush",
                ],
            ),
            Category::new(
                "Movies",
                [
                    "Titanic", "Jaws", "Shrek", "Avatar", "Frozen", "Rocky", "Gladiator",
                    "Inception", "Matrix", "Coco",
                ],
            ),
            Category::new(
                "Countries",
                [
                    "Mexico", "Japan", "Spain", "Brazil", "Egypt", "Canada", "Italy", "India",
                    "Argentina", "Australia",
                ],
            ),
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
