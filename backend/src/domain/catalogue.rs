//! Catalogue service: the fetch orchestrator.
//!
//! Every call tries the remote offer source first and degrades to the
//! embedded fallback dataset on any failure, inside the same call; there
//! is no circuit-breaker memory between requests. Both branches run the
//! identical adapter → filter → sort → paginate pipeline, so degraded mode
//! behaves exactly like live mode apart from the data it serves. Listing
//! callers never see an error.

use std::num::NonZeroU32;
use std::sync::Arc;

use pagination::{Page, paginate};
use tracing::warn;

use super::criteria::FilterCriteria;
use super::fallback::fallback_offers;
use super::filter::apply_filters;
use super::offer::map_offer_to_product;
use super::ports::OfferSource;
use super::product::{Category, Product};
use super::sort::sort_products;

/// Maximum number of search suggestions returned to the UI.
const MAX_SUGGESTIONS: usize = 8;

/// Orchestrates offer acquisition and the browse pipeline.
#[derive(Clone)]
pub struct CatalogueService {
    source: Arc<dyn OfferSource>,
}

impl CatalogueService {
    /// Build a service around an offer source.
    #[must_use]
    pub fn new(source: Arc<dyn OfferSource>) -> Self {
        Self { source }
    }

    /// Fetch, filter, sort, and paginate the catalogue. Infallible: remote
    /// failures degrade to the fallback dataset.
    pub async fn fetch_products(
        &self,
        criteria: &FilterCriteria,
        page: NonZeroU32,
        per_page: NonZeroU32,
    ) -> Page<Product> {
        let products = self.all_products().await;
        let filtered = apply_filters(&products, criteria);
        let sorted = sort_products(&filtered, criteria.sort_by.unwrap_or_default());
        paginate(&sorted, page, per_page)
    }

    /// Fetch a single product by upstream id, with the same fallback
    /// behaviour as the listing.
    pub async fn fetch_product(&self, id: u64) -> Option<Product> {
        match self.source.fetch_offer(id).await {
            Ok(found) => found.map(map_offer_to_product),
            Err(error) => {
                warn!(%error, id, "offer source failed, serving fallback record");
                fallback_offers()
                    .into_iter()
                    .map(map_offer_to_product)
                    .find(|product| product.id == id)
            }
        }
    }

    /// The full normalized collection, remote when possible, fallback
    /// otherwise.
    pub async fn all_products(&self) -> Vec<Product> {
        let offers = match self.source.fetch_offers().await {
            Ok(offers) => offers,
            Err(error) => {
                warn!(%error, "offer source failed, serving fallback dataset");
                fallback_offers()
            }
        };
        offers.into_iter().map(map_offer_to_product).collect()
    }

    /// Listing counts per category, for browse navigation.
    pub async fn category_counts(&self) -> Vec<(Category, usize)> {
        let products = self.all_products().await;
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = products
                    .iter()
                    .filter(|product| product.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}

/// Search-box suggestions drawn from titles, tags, seller names, and
/// brands. Queries shorter than two characters yield nothing.
#[must_use]
pub fn search_suggestions(products: &[Product], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return Vec::new();
    }

    let mut suggestions: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        if candidate.to_lowercase().contains(&needle)
            && !suggestions.iter().any(|s| s == candidate)
        {
            suggestions.push(candidate.to_owned());
        }
    };

    for product in products {
        push(&product.title);
        for tag in &product.tags {
            push(tag);
        }
        push(&product.user.name);
        if let Some(brand) = product.brand.as_deref() {
            push(brand);
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
