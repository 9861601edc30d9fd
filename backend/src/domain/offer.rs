//! The raw offer record and its adapter into [`Product`].
//!
//! Offers arrive from an external service whose shape this system does not
//! control: fields go missing, numbers arrive as strings, locations are
//! free text. [`map_offer_to_product`] is a total function over that mess.
//! It never fails, and a bad field degrades that field only, never the whole
//! record. Nothing loosely typed leaks past this module.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::brand::derive_brand;
use super::country::Country;
use super::localization::resolve_location;
use super::product::{
    Category, Condition, Currency, PriceType, Product, ProductImage, ProductStats,
    SellerSnapshot, Status,
};
use super::slug::slugify;

/// Characters kept from the description for the listing card blurb.
const SHORT_DESCRIPTION_CHARS: usize = 120;

/// Raw offer record as supplied by the offers endpoint.
///
/// Every field is optional and numeric fields are deliberately untyped:
/// the upstream service is known to send `"price": "49.90"` as happily as
/// `"price": 49.9`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOffer {
    /// Upstream identifier, number or numeric string.
    pub id: Option<Value>,
    /// Provided slug, when the upstream bothered.
    pub slug: Option<String>,
    /// Listing title.
    pub title: Option<String>,
    /// Listing description.
    pub description: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Subcategory label.
    pub subcategory: Option<String>,
    /// Explicit brand.
    pub brand: Option<String>,
    /// Model or variant.
    pub model: Option<String>,
    /// Price, number or numeric string.
    pub price: Option<Value>,
    /// ISO currency code.
    pub currency: Option<String>,
    /// Pricing model label.
    pub price_type: Option<String>,
    /// Lead image URL.
    pub featured_image: Option<String>,
    /// Alternative single-image field some records carry instead.
    pub image: Option<String>,
    /// Another single-image variant.
    pub thumbnail: Option<String>,
    /// Gallery, possibly empty.
    pub images: Vec<RawImage>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Selling points.
    pub features: Vec<String>,
    /// Open specification map with arbitrary value types.
    pub specifications: BTreeMap<String, Value>,
    /// Moderation status label.
    pub status: Option<String>,
    /// Editorial feature flag.
    pub is_featured: Option<bool>,
    /// Trending flag.
    pub is_trending: Option<bool>,
    /// Free-text location; the upstream spells the field both ways.
    #[serde(alias = "location")]
    pub localisation: Option<String>,
    /// Explicit country code, consulted when the location text resolves to
    /// nothing.
    pub country: Option<String>,
    /// Explicit city, preferred over the location text for display.
    pub city: Option<String>,
    /// Condition label.
    pub condition: Option<String>,
    /// Creation timestamp, ISO-8601.
    pub created_at: Option<String>,
    /// Modification timestamp, ISO-8601.
    pub updated_at: Option<String>,
    /// Publication timestamp, ISO-8601.
    pub published_at: Option<String>,
    /// Seller record.
    pub user: Option<RawSeller>,
    /// Raw reviews; aggregates are recomputed from these when present.
    pub reviews: Vec<RawReview>,
    /// Explicit sales counter.
    pub sales_count: Option<Value>,
    /// Explicit views counter.
    pub views_count: Option<Value>,
    /// Nested aggregate block some records carry.
    pub stats: Option<RawStats>,
}

/// Raw gallery entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawImage {
    /// Image URL.
    pub url: Option<String>,
    /// Alternative text.
    pub alt: Option<String>,
    /// Lead-image marker.
    pub is_primary: Option<bool>,
}

/// Raw seller block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSeller {
    /// Seller identifier, number or numeric string.
    pub id: Option<Value>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Verification flag.
    pub is_verified: Option<bool>,
    /// Aggregate rating.
    pub rating: Option<Value>,
    /// Listing count.
    pub products_count: Option<Value>,
}

/// Raw review entry; only the rating feeds the aggregates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawReview {
    /// Review rating.
    pub rating: Option<Value>,
    /// Review text, unused by the adapter.
    pub comment: Option<String>,
}

/// Nested aggregate block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStats {
    /// Lifetime sales.
    pub total_sales: Option<Value>,
    /// Lifetime views.
    pub views_count: Option<Value>,
}

/// Map a raw offer into the canonical product. Total: never fails, missing
/// fields get defensible defaults.
#[must_use]
pub fn map_offer_to_product(offer: RawOffer) -> Product {
    let id = lenient_u64(offer.id.as_ref());
    let title = offer.title.map(|t| t.trim().to_owned()).unwrap_or_default();
    let description = offer.description.unwrap_or_default();
    let short_description: String = description.chars().take(SHORT_DESCRIPTION_CHARS).collect();

    let slug = {
        let candidate = offer
            .slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(title.as_str());
        let derived = slugify(candidate);
        if derived.is_empty() {
            format!("offer-{id}")
        } else {
            derived
        }
    };

    let tags = normalize_tags(&offer.tags);
    let brand = derive_brand(offer.brand.as_deref(), &tags, &title);

    let city = offer
        .city
        .or(offer.localisation.clone())
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty());
    let country: Country = offer
        .localisation
        .as_deref()
        .and_then(resolve_location)
        .or_else(|| offer.country.as_deref().and_then(|code| code.parse().ok()))
        .unwrap_or_default();

    let images = build_images(
        offer.images,
        offer.featured_image.as_deref(),
        offer.image.as_deref(),
        offer.thumbnail.as_deref(),
    );
    let featured_image = offer
        .featured_image
        .filter(|url| !url.trim().is_empty())
        .or_else(|| {
            images
                .iter()
                .find(|image| image.is_primary)
                .or_else(|| images.first())
                .map(|image| image.url.clone())
        })
        .unwrap_or_default();

    let stats = build_stats(
        &offer.reviews,
        offer.sales_count.as_ref(),
        offer.views_count.as_ref(),
        offer.stats.as_ref(),
    );

    Product {
        id,
        slug,
        title,
        short_description,
        description,
        category: parse_or_default::<Category>(offer.category.as_deref()),
        subcategory: non_empty(offer.subcategory),
        brand,
        model: offer.model.unwrap_or_default(),
        price: lenient_f64(offer.price.as_ref()).max(0.0),
        currency: parse_or_default::<Currency>(offer.currency.as_deref()),
        price_type: parse_or_default::<PriceType>(offer.price_type.as_deref()),
        featured_image,
        images,
        tags,
        features: offer.features,
        specifications: offer
            .specifications
            .into_iter()
            .map(|(key, value)| (key, value_to_string(&value)))
            .collect(),
        status: parse_or_default::<Status>(offer.status.as_deref()),
        is_featured: offer.is_featured.unwrap_or_default(),
        is_trending: offer.is_trending.unwrap_or_default(),
        country,
        city,
        condition: offer
            .condition
            .as_deref()
            .and_then(|label| label.parse::<Condition>().ok()),
        created_at: parse_timestamp(offer.created_at.as_deref()),
        updated_at: parse_timestamp(offer.updated_at.as_deref()),
        published_at: offer
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|ts| ts.with_timezone(&Utc)),
        user: offer.user.map(map_seller).unwrap_or_default(),
        stats,
    }
}

/// Trim, lower-case, and deduplicate tags while preserving first-seen order.
fn normalize_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn build_images(
    provided: Vec<RawImage>,
    featured: Option<&str>,
    image: Option<&str>,
    thumbnail: Option<&str>,
) -> Vec<ProductImage> {
    let mapped: Vec<ProductImage> = provided
        .into_iter()
        .filter_map(|raw| {
            let url = raw.url.filter(|url| !url.trim().is_empty())?;
            Some(ProductImage {
                url,
                alt: raw.alt.unwrap_or_default(),
                is_primary: raw.is_primary.unwrap_or_default(),
            })
        })
        .collect();
    if !mapped.is_empty() {
        return mapped;
    }

    [featured, image, thumbnail]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .map(|url| {
            vec![ProductImage {
                url: url.to_owned(),
                alt: String::new(),
                is_primary: true,
            }]
        })
        .unwrap_or_default()
}

fn build_stats(
    reviews: &[RawReview],
    sales_count: Option<&Value>,
    views_count: Option<&Value>,
    nested: Option<&RawStats>,
) -> ProductStats {
    let (total_reviews, average_rating) = if reviews.is_empty() {
        (0, 0.0)
    } else {
        let sum: f64 = reviews
            .iter()
            .map(|review| lenient_f64(review.rating.as_ref()))
            .sum();
        let mean = sum / reviews.len() as f64;
        (
            u32::try_from(reviews.len()).unwrap_or(u32::MAX),
            mean.clamp(0.0, 5.0),
        )
    };

    let total_sales = first_count(sales_count, nested.and_then(|s| s.total_sales.as_ref()));
    let views = first_count(views_count, nested.and_then(|s| s.views_count.as_ref()));

    ProductStats {
        total_reviews,
        average_rating,
        total_sales,
        views_count: views,
    }
}

fn first_count(explicit: Option<&Value>, nested: Option<&Value>) -> u64 {
    explicit
        .or(nested)
        .map(|value| lenient_u64(Some(value)))
        .unwrap_or_default()
}

fn map_seller(raw: RawSeller) -> SellerSnapshot {
    SellerSnapshot {
        id: lenient_u64(raw.id.as_ref()),
        name: raw.name.unwrap_or_default(),
        avatar: raw.avatar.unwrap_or_default(),
        is_verified: raw.is_verified.unwrap_or_default(),
        rating: lenient_f64(raw.rating.as_ref()),
        products_count: u32::try_from(lenient_u64(raw.products_count.as_ref()))
            .unwrap_or(u32::MAX),
    }
}

/// Safe numeric parse: numbers pass through, numeric strings parse,
/// everything else is 0.
fn lenient_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

fn lenient_u64(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

fn parse_or_default<T: std::str::FromStr + Default>(raw: Option<&str>) -> T {
    raw.and_then(|label| label.trim().parse().ok()).unwrap_or_default()
}

fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn offer_from_json(value: Value) -> RawOffer {
        serde_json::from_value(value).expect("raw offers deserialise leniently")
    }

    #[rstest]
    fn empty_offer_maps_to_defensible_defaults() {
        let product = map_offer_to_product(RawOffer::default());

        assert_eq!(product.id, 0);
        assert_eq!(product.slug, "offer-0");
        assert_eq!(product.price, 0.0);
        assert!(product.tags.is_empty());
        assert!(product.images.is_empty());
        assert_eq!(product.country, Country::Other);
        assert_eq!(product.stats.total_reviews, 0);
        assert_eq!(product.stats.average_rating, 0.0);
        assert_eq!(product.status, Status::Active);
        assert_eq!(product.currency, Currency::Eur);
    }

    #[rstest]
    fn location_text_resolves_country_and_keeps_city_wording() {
        let offer = offer_from_json(json!({
            "title": "Paris Design Gig",
            "localisation": "Bruxelles"
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.city.as_deref(), Some("Bruxelles"));
        assert_eq!(product.country, Country::Be);
        assert_eq!(product.slug, "paris-design-gig");
    }

    #[rstest]
    fn unresolved_location_falls_back_to_explicit_country() {
        let offer = offer_from_json(json!({
            "localisation": "Springfield",
            "country": "us"
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.country, Country::Us);
        assert_eq!(product.city.as_deref(), Some("Springfield"));
    }

    #[rstest]
    #[case::number(json!(49.9), 49.9)]
    #[case::numeric_string(json!("129.50"), 129.5)]
    #[case::garbage(json!("call me"), 0.0)]
    #[case::negative(json!(-5), 0.0)]
    fn price_coerces_safely(#[case] raw: Value, #[case] expected: f64) {
        let offer = offer_from_json(json!({ "price": raw }));
        assert_eq!(map_offer_to_product(offer).price, expected);
    }

    #[rstest]
    fn short_description_truncates_at_120_chars() {
        let description = "x".repeat(300);
        let offer = offer_from_json(json!({ "description": description }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.short_description.chars().count(), 120);
        assert_eq!(product.description.chars().count(), 300);
    }

    #[rstest]
    fn review_stats_are_recomputed_from_raw_reviews() {
        let offer = offer_from_json(json!({
            "reviews": [
                { "rating": 5, "comment": "great" },
                { "rating": 4 },
                { "rating": "3" }
            ],
            "stats": { "total_sales": "17" }
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.stats.total_reviews, 3);
        assert!((product.stats.average_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(product.stats.total_sales, 17);
    }

    #[rstest]
    fn explicit_sales_count_beats_nested_stats() {
        let offer = offer_from_json(json!({
            "sales_count": 9,
            "stats": { "total_sales": 17 }
        }));
        assert_eq!(map_offer_to_product(offer).stats.total_sales, 9);
    }

    #[rstest]
    fn tags_are_lowercased_and_deduplicated() {
        let offer = offer_from_json(json!({
            "tags": [" Design ", "design", "FIGMA", "", "figma"]
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.tags, vec!["design".to_owned(), "figma".to_owned()]);
    }

    #[rstest]
    fn single_image_field_synthesises_a_primary_entry() {
        let offer = offer_from_json(json!({ "image": "https://cdn.example/shot.jpg" }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.images.len(), 1);
        assert!(product.images[0].is_primary);
        assert_eq!(product.featured_image, "https://cdn.example/shot.jpg");
    }

    #[rstest]
    fn provided_gallery_wins_over_single_image_fields() {
        let offer = offer_from_json(json!({
            "image": "https://cdn.example/ignored.jpg",
            "images": [
                { "url": "https://cdn.example/1.jpg" },
                { "url": "https://cdn.example/2.jpg", "is_primary": true }
            ]
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.images.len(), 2);
        assert_eq!(product.featured_image, "https://cdn.example/2.jpg");
    }

    #[rstest]
    fn location_alias_is_accepted() {
        let offer = offer_from_json(json!({ "location": "Genève" }));
        let product = map_offer_to_product(offer);
        assert_eq!(product.country, Country::Ch);
    }

    #[rstest]
    fn malformed_fields_degrade_individually() {
        let offer = offer_from_json(json!({
            "title": "Working title",
            "price": { "amount": 10 },
            "created_at": "not a date",
            "condition": "mint",
            "currency": "DOGE"
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.title, "Working title");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.created_at, DateTime::UNIX_EPOCH);
        assert_eq!(product.condition, None);
        assert_eq!(product.currency, Currency::Eur);
    }

    #[rstest]
    fn specifications_values_are_stringified() {
        let offer = offer_from_json(json!({
            "specifications": { "format": "A4", "pages": 12, "vector": true }
        }));
        let product = map_offer_to_product(offer);

        assert_eq!(product.specifications["format"], "A4");
        assert_eq!(product.specifications["pages"], "12");
        assert_eq!(product.specifications["vector"], "true");
    }
}
