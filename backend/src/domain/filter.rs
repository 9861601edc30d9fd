//! The filter engine: a pure conjunction of optional predicates.
//!
//! Each predicate is skipped entirely when its criterion is absent, so an
//! empty [`FilterCriteria`] is the identity and adding a criterion can only
//! shrink the result. Survivors keep their input order.

use super::criteria::FilterCriteria;
use super::product::Product;

/// Apply `criteria` to `products`, keeping survivors in input order.
#[must_use]
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|product| matches(product, criteria))
        .cloned()
        .collect()
}

fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    matches_search(product, criteria.search.as_deref())
        && matches_category(product, criteria)
        && matches_price(product, criteria)
        && matches_condition(product, criteria)
        && matches_brand(product, criteria.brand.as_deref())
        && matches_tags(product, criteria.tags.as_deref())
        && matches_flag(product.is_featured, criteria.is_featured)
        && matches_flag(product.is_trending, criteria.is_trending)
        && matches_city(product, criteria.city.as_deref())
}

/// Free-text search: case-insensitive substring OR across title,
/// description, tags, subcategory, category, brand, and seller name.
fn matches_search(product: &Product, search: Option<&str>) -> bool {
    let Some(raw) = search else {
        return true;
    };
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |text: &str| text.to_lowercase().contains(&needle);

    contains(&product.title)
        || contains(&product.description)
        || product.tags.iter().any(|tag| tag.contains(&needle))
        || product.subcategory.as_deref().is_some_and(contains)
        || contains(product.category.as_str())
        || product.brand.as_deref().is_some_and(contains)
        || contains(&product.user.name)
}

fn matches_category(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria
        .category
        .as_ref()
        .is_none_or(|filter| filter.matches(product.category))
}

fn matches_price(product: &Product, criteria: &FilterCriteria) -> bool {
    if let Some(min) = criteria.price_min {
        if product.price < min {
            return false;
        }
    }
    if let Some(max) = criteria.price_max {
        if product.price > max {
            return false;
        }
    }
    true
}

fn matches_condition(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria
        .condition
        .is_none_or(|wanted| product.condition == Some(wanted))
}

/// Brand matches by case-insensitive equality, not substring; "Sony" must
/// not match "Sonys Atelier".
fn matches_brand(product: &Product, brand: Option<&str>) -> bool {
    let Some(raw) = brand else {
        return true;
    };
    let wanted = raw.trim().to_lowercase();
    if wanted.is_empty() {
        return true;
    }
    product
        .brand
        .as_deref()
        .is_some_and(|have| have.to_lowercase() == wanted)
}

/// Tag criterion: OR semantics, an empty list imposes no constraint.
fn matches_tags(product: &Product, tags: Option<&[String]>) -> bool {
    let Some(wanted) = tags else {
        return true;
    };
    if wanted.is_empty() {
        return true;
    }
    wanted.iter().any(|tag| {
        let tag = tag.trim().to_lowercase();
        product.tags.iter().any(|have| *have == tag)
    })
}

/// Boolean flags constrain only when the criterion is `true`.
fn matches_flag(value: bool, criterion: Option<bool>) -> bool {
    if criterion == Some(true) { value } else { true }
}

fn matches_city(product: &Product, city: Option<&str>) -> bool {
    let Some(raw) = city else {
        return true;
    };
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    product
        .city
        .as_deref()
        .is_some_and(|have| have.to_lowercase().contains(&needle))
}
