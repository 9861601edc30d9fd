//! Stable product ordering.
//!
//! All sorts are stable and non-mutating: ties keep the relative order of
//! the input, and callers get a fresh vector. `trending` is a stable
//! partition rather than a full comparator so that non-trending items never
//! reorder among themselves.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::product::Product;

/// Supported listing sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending price.
    Price,
    /// Descending average rating.
    Rating,
    /// Descending total sales.
    Sales,
    /// Trending listings first, order otherwise untouched.
    Trending,
    /// Newest first. The default.
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Wire representation, matching the serde encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Sales => "sales",
            Self::Trending => "trending",
            Self::CreatedAt => "created_at",
        }
    }

    /// Parse a query-string value, falling back to the default for unknown
    /// or empty input rather than failing the request.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "price" => Self::Price,
            "rating" => Self::Rating,
            "sales" => Self::Sales,
            "trending" => Self::Trending,
            _ => Self::CreatedAt,
        }
    }
}

/// Order `products` by `key` into a new vector.
#[must_use]
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Price => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Rating => sorted.sort_by(|a, b| {
            b.stats
                .average_rating
                .total_cmp(&a.stats.average_rating)
        }),
        SortKey::Sales => sorted.sort_by(|a, b| b.stats.total_sales.cmp(&a.stats.total_sales)),
        // Stable partition: `false` sorts before `true`, so flagged items
        // lead and both groups keep their relative order.
        SortKey::Trending => sorted.sort_by_key(|product| !product.is_trending),
        SortKey::CreatedAt => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    sorted
}
