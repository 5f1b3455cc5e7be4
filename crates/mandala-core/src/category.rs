//! The closed, ordered list of categories the engine knows about.

use serde::{Deserialize, Serialize};

use crate::identifier::Category;

/// Category names of the reference domain, in priority order.
pub const REFERENCE_CATEGORIES: [&str; 9] = [
    "Hub",
    "Tribe",
    "Clan",
    "Archetype",
    "Totem",
    "Season",
    "Direction",
    "Lineage",
    "Ancestor",
];

/// Ordered list of known categories.
///
/// Order matters twice: it numbers placeholder ids during normalization and
/// it is the ring priority of the radial layout. Duplicate names are dropped
/// on construction, keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use mandala_core::category::CategorySet;
///
/// let set = CategorySet::new(["Hub", "Tribe", "Hub"]);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.index_of("Tribe"), Some(1));
/// assert_eq!(set.index_of("Unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new<I, C>(categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let mut unique: Vec<Category> = Vec::new();
        for category in categories {
            let category = category.into();
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        Self { categories: unique }
    }

    /// Zero-based position of `name` in this set.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.as_str() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(REFERENCE_CATEGORIES)
    }
}

impl From<Vec<Category>> for CategorySet {
    fn from(categories: Vec<Category>) -> Self {
        Self::new(categories)
    }
}

impl From<CategorySet> for Vec<Category> {
    fn from(set: CategorySet) -> Self {
        set.categories
    }
}
