//! Fixed reference data the generator samples from.

use strum::Display;
use strum::EnumIter;
use strum::IntoStaticStr;
use strum::VariantArray;

/// Number of customers generated when none is requested explicitly.
pub const DEFAULT_CUSTOMERS: u32 = 100;
/// Number of orders generated when none is requested explicitly.
pub const DEFAULT_ORDERS: u32 = 1_000;

/// Valid values of a customer's `state`.
pub const STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME",
    "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA",
    "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, VariantArray)]
pub enum Category {
    #[strum(serialize = "electronics")]
    Electronics,
    #[strum(serialize = "clothing")]
    Clothing,
    #[strum(serialize = "home")]
    Home,
    #[strum(serialize = "books")]
    Books,
    #[strum(serialize = "sports")]
    Sports,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Sub-categories an order of this category may carry.
    pub fn sub_categories(self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &["laptops", "phones", "headphones", "cameras"],
            Category::Clothing => &["shirts", "pants", "shoes", "jackets"],
            Category::Home => &["furniture", "kitchen", "bedding", "decor"],
            Category::Books => &["fiction", "non-fiction", "comics", "textbooks"],
            Category::Sports => &["fitness", "outdoor", "cycling", "team sports"],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Category::VARIANTS.iter().copied().find(|c| c.as_str() == name)
    }
}

pub fn is_valid_state(state: &str) -> bool {
    STATES.contains(&state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn states_are_unique() {
        let unique: HashSet<_> = STATES.iter().collect();
        assert_eq!(unique.len(), STATES.len());
        assert!(is_valid_state("TX"));
        assert!(!is_valid_state("XX"));
    }

    #[test]
    fn every_category_has_sub_categories() {
        for category in Category::iter() {
            assert!(!category.sub_categories().is_empty(), "{category} has no sub-categories");
            assert_eq!(Category::from_name(category.as_str()), Some(category));
            assert_eq!(category.to_string(), category.as_str());
        }
        assert_eq!(Category::from_name("groceries"), None);
    }
}
