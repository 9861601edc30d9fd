//! Shared product fixtures for unit tests.

use std::collections::BTreeMap;

use chrono::DateTime;

use super::country::Country;
use super::product::{
    Category, Currency, PriceType, Product, ProductStats, SellerSnapshot, Status,
};
use super::slug::slugify;

/// A minimal active product with the given identity and price.
pub(crate) fn product_with(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        slug: slugify(title),
        title: title.to_owned(),
        description: String::new(),
        short_description: String::new(),
        category: Category::Other,
        subcategory: None,
        brand: None,
        model: String::new(),
        price,
        currency: Currency::Eur,
        price_type: PriceType::Fixed,
        featured_image: String::new(),
        images: Vec::new(),
        tags: Vec::new(),
        features: Vec::new(),
        specifications: BTreeMap::new(),
        status: Status::Active,
        is_featured: false,
        is_trending: false,
        country: Country::Other,
        city: None,
        condition: None,
        created_at: DateTime::UNIX_EPOCH,
        updated_at: DateTime::UNIX_EPOCH,
        published_at: None,
        user: SellerSnapshot {
            name: "Test Seller".to_owned(),
            ..SellerSnapshot::default()
        },
        stats: ProductStats::default(),
    }
}
