//! Canonical product entity and its classification enums.
//!
//! `Product` is the normalized target of the offer adapter: every listing
//! the filtering, sorting, and pagination pipeline touches has this shape,
//! regardless of which upstream record it was derived from.
//!
//! ## Invariants
//! - `price >= 0`.
//! - `stats.average_rating` lies in `[0, 5]`.
//! - `slug` is non-empty and URL-safe.
//! - `tags` holds lower-cased entries with no duplicates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::country::Country;

/// Product category used for browse navigation and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Graphic and product design work.
    Design,
    /// Courses and training material.
    Course,
    /// Consulting engagements.
    Consulting,
    /// Software licences and custom builds.
    Software,
    /// Recurring or one-off services.
    Service,
    /// Downloadable digital goods.
    DigitalProduct,
    /// Marketing and growth offers.
    Marketing,
    /// Anything that fits no other bucket.
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 8] = [
        Self::Design,
        Self::Course,
        Self::Consulting,
        Self::Software,
        Self::Service,
        Self::DigitalProduct,
        Self::Marketing,
        Self::Other,
    ];

    /// Wire representation, matching the serde encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Course => "course",
            Self::Consulting => "consulting",
            Self::Software => "software",
            Self::Service => "service",
            Self::DigitalProduct => "digital_product",
            Self::Marketing => "marketing",
            Self::Other => "other",
        }
    }

    /// Human-readable label for category listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Design => "Design",
            Self::Course => "Courses",
            Self::Consulting => "Consulting",
            Self::Software => "Software",
            Self::Service => "Services",
            Self::DigitalProduct => "Digital products",
            Self::Marketing => "Marketing",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// Physical condition of second-hand goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Unused, in original packaging.
    New,
    /// Used but indistinguishable from new.
    LikeNew,
    /// Visible wear, fully functional.
    Good,
    /// Heavy wear.
    Fair,
    /// Needs repair.
    Poor,
}

impl Condition {
    /// Wire representation, matching the serde encoding.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "like_new" => Ok(Self::LikeNew),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => Err(UnknownVariant::new("condition", s)),
        }
    }
}

/// Settlement currency for a listing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro, the marketplace default.
    #[default]
    Eur,
    /// US dollar.
    Usd,
    /// Pound sterling.
    Gbp,
    /// Swiss franc.
    Chf,
    /// Canadian dollar.
    Cad,
    /// Australian dollar.
    Aud,
    /// Japanese yen.
    Jpy,
}

impl Currency {
    /// ISO 4217 code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Jpy => "JPY",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "GBP" => Ok(Self::Gbp),
            "CHF" => Ok(Self::Chf),
            "CAD" => Ok(Self::Cad),
            "AUD" => Ok(Self::Aud),
            "JPY" => Ok(Self::Jpy),
            _ => Err(UnknownVariant::new("currency", s)),
        }
    }
}

/// How the listed price is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// One-off fixed price.
    #[default]
    Fixed,
    /// Recurring subscription.
    Subscription,
    /// Price on request.
    Quote,
    /// Free of charge.
    Free,
}

impl std::str::FromStr for PriceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "subscription" => Ok(Self::Subscription),
            "quote" => Ok(Self::Quote),
            "free" => Ok(Self::Free),
            _ => Err(UnknownVariant::new("price type", s)),
        }
    }
}

/// Moderation status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet submitted by the seller.
    Draft,
    /// Visible in the marketplace.
    #[default]
    Active,
    /// Withdrawn by the seller.
    Inactive,
    /// Awaiting moderation.
    Pending,
    /// Refused by moderation.
    Rejected,
}

impl std::str::FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}

/// Error returned when parsing an unrecognised enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    kind: &'static str,
    input: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_owned(),
        }
    }
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.input)
    }
}

impl std::error::Error for UnknownVariant {}

/// A single gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    /// Image location.
    pub url: String,
    /// Alternative text for accessibility.
    #[serde(default)]
    pub alt: String,
    /// Whether this image leads the gallery.
    #[serde(default)]
    pub is_primary: bool,
}

/// Embedded snapshot of the selling user.
///
/// This is a weak reference: the snapshot is frozen at adaptation time and
/// never refreshed against a live user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, ToSchema)]
pub struct SellerSnapshot {
    /// Seller identifier in the upstream system.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Avatar URL, empty when the seller has none.
    #[serde(default)]
    pub avatar: String,
    /// Whether the marketplace verified this seller.
    #[serde(default)]
    pub is_verified: bool,
    /// Aggregate seller rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of listings this seller has published.
    #[serde(default)]
    pub products_count: u32,
}

/// Derived listing aggregates, recomputed by the adapter from raw reviews
/// when present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default, ToSchema)]
pub struct ProductStats {
    /// Number of reviews behind `average_rating`.
    pub total_reviews: u32,
    /// Mean review rating in `[0, 5]`, unrounded.
    pub average_rating: f64,
    /// Lifetime units sold.
    pub total_sales: u64,
    /// Lifetime detail-page views.
    pub views_count: u64,
}

/// The canonical, normalized marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Upstream numeric identifier.
    pub id: u64,
    /// Unique URL-safe identifier, derived from the title when absent.
    pub slug: String,
    /// Listing title.
    pub title: String,
    /// Full listing description.
    pub description: String,
    /// First 120 characters of the description.
    pub short_description: String,
    /// Browse category.
    pub category: Category,
    /// Optional free-text subcategory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Brand, derived heuristically when the upstream record omits it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model or variant designation.
    #[serde(default)]
    pub model: String,
    /// Listing price, never negative.
    pub price: f64,
    /// Settlement currency.
    pub currency: Currency,
    /// How the price is charged.
    pub price_type: PriceType,
    /// Lead image URL, empty when the listing has no imagery.
    #[serde(default)]
    pub featured_image: String,
    /// Ordered gallery.
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Lower-cased, deduplicated tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered selling points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Open key/value specification map.
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    /// Moderation status.
    pub status: Status,
    /// Editorially featured flag.
    pub is_featured: bool,
    /// Trending flag; independent of `is_featured`.
    pub is_trending: bool,
    /// Resolved country, `OTHER` when normalization found no match.
    pub country: Country,
    /// Free-text city as supplied by the seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Condition for second-hand goods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Publication timestamp, absent for unpublished listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Frozen seller snapshot.
    pub user: SellerSnapshot,
    /// Derived aggregates.
    pub stats: ProductStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::design("design", Category::Design)]
    #[case::digital_product("digital_product", Category::DigitalProduct)]
    #[case::other("other", Category::Other)]
    fn category_round_trips_through_wire_form(#[case] wire: &str, #[case] expected: Category) {
        assert_eq!(wire.parse::<Category>(), Ok(expected));
        assert_eq!(expected.as_str(), wire);
    }

    #[rstest]
    fn unknown_category_is_rejected_with_context() {
        let err = "gadgets".parse::<Category>().expect_err("must not parse");
        assert_eq!(err.to_string(), "unknown category: gadgets");
    }

    #[rstest]
    fn currency_serialises_to_iso_codes() {
        let json = serde_json::to_string(&Currency::Chf).expect("currency should serialise");
        assert_eq!(json, "\"CHF\"");
    }

    #[rstest]
    fn condition_uses_snake_case_wire_form() {
        assert_eq!("like_new".parse::<Condition>(), Ok(Condition::LikeNew));
        let json = serde_json::to_string(&Condition::LikeNew).expect("should serialise");
        assert_eq!(json, "\"like_new\"");
    }
}
