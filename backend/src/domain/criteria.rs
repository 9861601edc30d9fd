//! Filter criteria: the optional constraints a browse request carries.
//!
//! Every field is optional and absence means "no constraint". An empty tag
//! or category list is also treated as "no constraint" rather than "match
//! nothing"; UIs clear a facet by emptying it, and an accidental inversion
//! here would blank the whole listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::product::{Category, Condition};
use super::sort::SortKey;

/// Category constraint: a single category or a set with OR semantics.
///
/// The set form is canonical; the scalar form is kept for callers that only
/// ever pick one category at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryFilter {
    /// Exactly this category.
    One(Category),
    /// Any of these categories.
    Any(Vec<Category>),
}

impl CategoryFilter {
    /// Whether `category` satisfies this constraint.
    ///
    /// An empty set imposes no constraint.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::One(wanted) => *wanted == category,
            Self::Any(set) => set.is_empty() || set.contains(&category),
        }
    }

    /// Whether this constraint actually constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Any(set) if set.is_empty())
    }
}

/// The current set of optional browse constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct FilterCriteria {
    /// Free-text search across title, description, tags, subcategory,
    /// category, brand, and seller name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Category constraint, scalar or set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryFilter>,
    /// Inclusive lower price bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    /// Exact condition match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Case-insensitive brand equality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Tag set with OR semantics: a product matches when it carries any of
    /// these tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Case-insensitive substring match on the product city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Only featured listings when `true`; no constraint otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Only trending listings when `true`; no constraint otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
    /// Requested ordering; [`SortKey::CreatedAt`] when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
}

impl FilterCriteria {
    /// Number of active constraints, for the UI filter badge.
    ///
    /// Each selected tag counts individually; a price range counts once no
    /// matter how many bounds are set. The sort order is presentation, not
    /// a filter, and never counts.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if self.search.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            count += 1;
        }
        if self.category.as_ref().is_some_and(|c| !c.is_empty()) {
            count += 1;
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            count += 1;
        }
        if let Some(tags) = &self.tags {
            count += tags.len();
        }
        if self.is_featured == Some(true) {
            count += 1;
        }
        count
    }

    /// Whether any constraint is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_criteria_counts_no_filters() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.active_filter_count(), 0);
        assert!(!criteria.has_active_filters());
    }

    #[rstest]
    fn each_tag_counts_individually() {
        let criteria = FilterCriteria {
            search: Some("kit".to_owned()),
            tags: Some(vec!["design".to_owned(), "figma".to_owned()]),
            price_min: Some(10.0),
            price_max: Some(90.0),
            is_featured: Some(true),
            ..FilterCriteria::default()
        };
        // search + 2 tags + price range + featured
        assert_eq!(criteria.active_filter_count(), 5);
    }

    #[rstest]
    fn blank_search_and_empty_category_set_do_not_count() {
        let criteria = FilterCriteria {
            search: Some("   ".to_owned()),
            category: Some(CategoryFilter::Any(Vec::new())),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[rstest]
    fn scalar_category_deserialises_from_a_bare_string() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"category":"design"}"#).expect("scalar form should parse");
        assert_eq!(criteria.category, Some(CategoryFilter::One(Category::Design)));
    }

    #[rstest]
    fn category_set_deserialises_from_an_array() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{"category":["design","course"]}"#)
            .expect("set form should parse");
        let Some(filter) = criteria.category else {
            panic!("category filter should be present");
        };
        assert!(filter.matches(Category::Design));
        assert!(filter.matches(Category::Course));
        assert!(!filter.matches(Category::Marketing));
    }

    #[rstest]
    fn empty_category_set_matches_everything() {
        let filter = CategoryFilter::Any(Vec::new());
        assert!(filter.matches(Category::Other));
        assert!(filter.is_empty());
    }
}
