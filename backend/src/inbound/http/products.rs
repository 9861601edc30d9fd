//! Product browse endpoints.
//!
//! ```text
//! GET /api/v1/products
//! GET /api/v1/products/suggestions
//! GET /api/v1/products/{id}
//! GET /api/v1/categories
//! GET /api/v1/catalogue/version
//! ```

use std::num::NonZeroU32;

use actix_web::{HttpResponse, get, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::catalogue::search_suggestions;
use crate::domain::criteria::CategoryFilter;
use crate::domain::product::{Category, Condition};
use crate::domain::{FilterCriteria, Product, SortKey};

use super::error::{ApiResponse, ApiResult};
use super::state::AppState;

/// Listing page size when the client does not ask for one.
const DEFAULT_PER_PAGE: u32 = 12;
/// Upper bound on the page size a client may request.
const MAX_PER_PAGE: u32 = 100;

/// Query parameters accepted by the listing endpoint.
///
/// All filters are optional; `tags` and `category` accept comma-separated
/// lists. Unknown categories, conditions, and sort keys are ignored rather
/// than failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct ProductListQuery {
    /// Free-text search.
    pub search: Option<String>,
    /// Category, scalar or comma-separated set.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    pub price_max: Option<f64>,
    /// Condition filter.
    pub condition: Option<String>,
    /// Brand filter (case-insensitive equality).
    pub brand: Option<String>,
    /// Comma-separated tag list, OR semantics.
    pub tags: Option<String>,
    /// City substring filter.
    pub city: Option<String>,
    /// Only featured listings when `true`.
    pub is_featured: Option<bool>,
    /// Only trending listings when `true`.
    pub is_trending: Option<bool>,
    /// Sort key; unknown values fall back to `created_at`.
    pub sort_by: Option<String>,
    /// Page number, clamped to at least 1.
    pub page: Option<u32>,
    /// Page size, clamped into `1..=100`.
    pub per_page: Option<u32>,
}

impl ProductListQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            category: self.category.as_deref().and_then(parse_category_param),
            price_min: self.price_min,
            price_max: self.price_max,
            condition: self
                .condition
                .as_deref()
                .and_then(|raw| raw.parse::<Condition>().ok()),
            brand: self.brand.clone(),
            tags: self.tags.as_deref().map(split_list),
            city: self.city.clone(),
            is_featured: self.is_featured,
            is_trending: self.is_trending,
            sort_by: self.sort_by.as_deref().map(SortKey::parse_or_default),
        }
    }

    fn page(&self) -> NonZeroU32 {
        NonZeroU32::new(self.page.unwrap_or(1)).unwrap_or(NonZeroU32::MIN)
    }

    fn per_page(&self) -> NonZeroU32 {
        let clamped = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN)
    }
}

/// Scalar form becomes an exact match; a comma-separated list becomes a
/// set with OR semantics. Unknown labels are dropped, and a list that
/// drops every entry imposes no constraint.
fn parse_category_param(raw: &str) -> Option<CategoryFilter> {
    if raw.contains(',') {
        let set: Vec<Category> = raw
            .split(',')
            .filter_map(|label| label.trim().parse().ok())
            .collect();
        Some(CategoryFilter::Any(set))
    } else {
        raw.trim().parse().ok().map(CategoryFilter::One)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Listing response: one page of products plus pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPageResponse {
    /// Products on this page.
    pub data: Vec<Product>,
    /// Requested page number.
    pub current_page: u32,
    /// Page size used.
    pub per_page: u32,
    /// Total matching products before slicing.
    pub total: u64,
    /// Last non-empty page, at least 1.
    pub last_page: u32,
    /// 1-indexed first item position, 0 when the page is empty.
    pub from: u64,
    /// 1-indexed last item position, 0 when the page is empty.
    pub to: u64,
}

impl From<Page<Product>> for ProductPageResponse {
    fn from(page: Page<Product>) -> Self {
        Self {
            data: page.data,
            current_page: page.current_page,
            per_page: page.per_page,
            total: page.total,
            last_page: page.last_page,
            from: page.from,
            to: page.to,
        }
    }
}

/// One category option with its listing count.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryOption {
    /// Wire value to send back as a filter.
    pub value: Category,
    /// Display label.
    pub label: &'static str,
    /// Listings currently in this category.
    pub count: usize,
}

/// Catalogue version payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogueVersion {
    /// Monotonic counter; a change means "refetch".
    pub version: u64,
}

/// List products with filtering, sorting, and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPageResponse)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<HttpResponse> {
    let criteria = query.criteria();
    let page = state
        .catalogue
        .fetch_products(&criteria, query.page(), query.per_page())
        .await;
    Ok(HttpResponse::Ok().json(ProductPageResponse::from(page)))
}

/// Search-box suggestion parameters.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionQuery {
    /// Partial search text; at least two characters yield results.
    #[serde(default)]
    pub q: String,
}

/// Suggest completions for the search box.
#[utoipa::path(
    get,
    path = "/api/v1/products/suggestions",
    params(SuggestionQuery),
    responses(
        (status = 200, description = "Up to eight suggestions")
    ),
    tags = ["products"],
    operation_id = "productSuggestions"
)]
#[get("/products/suggestions")]
pub async fn product_suggestions(
    state: web::Data<AppState>,
    query: web::Query<SuggestionQuery>,
) -> ApiResult<HttpResponse> {
    let products = state.catalogue.all_products().await;
    let suggestions = search_suggestions(&products, &query.q);
    Ok(HttpResponse::Ok().json(ApiResponse::success(suggestions)))
}

/// Fetch a single product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = u64, Path, description = "Upstream product identifier")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown product")
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn product_detail(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    match state.catalogue.fetch_product(id).await {
        Some(product) => Ok(HttpResponse::Ok().json(ApiResponse::success(product))),
        None => Err(super::error::ApiError::not_found("Product not found.")),
    }
}

/// List categories with their listing counts.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category options", body = [CategoryOption])
    ),
    tags = ["products"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let options: Vec<CategoryOption> = state
        .catalogue
        .category_counts()
        .await
        .into_iter()
        .map(|(category, count)| CategoryOption {
            value: category,
            label: category.label(),
            count,
        })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(options)))
}

/// Read the catalogue version counter.
#[utoipa::path(
    get,
    path = "/api/v1/catalogue/version",
    responses(
        (status = 200, description = "Current version counter", body = CatalogueVersion)
    ),
    tags = ["products"],
    operation_id = "catalogueVersion"
)]
#[get("/catalogue/version")]
pub async fn catalogue_version(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(CatalogueVersion {
        version: state.catalogue_version(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn comma_separated_categories_become_a_set() {
        let query = ProductListQuery {
            category: Some("design, course".to_owned()),
            ..ProductListQuery::default()
        };
        let criteria = query.criteria();
        let Some(filter) = criteria.category else {
            panic!("category filter should parse");
        };
        assert!(filter.matches(Category::Design));
        assert!(filter.matches(Category::Course));
        assert!(!filter.matches(Category::Other));
    }

    #[rstest]
    fn scalar_category_is_an_exact_constraint() {
        let query = ProductListQuery {
            category: Some("design".to_owned()),
            ..ProductListQuery::default()
        };
        assert_eq!(
            query.criteria().category,
            Some(CategoryFilter::One(Category::Design))
        );
    }

    #[rstest]
    fn unknown_scalar_category_is_dropped() {
        let query = ProductListQuery {
            category: Some("gadgets".to_owned()),
            ..ProductListQuery::default()
        };
        assert_eq!(query.criteria().category, None);
    }

    #[rstest]
    fn tags_split_on_commas_and_drop_blanks() {
        let query = ProductListQuery {
            tags: Some("design,, figma ,".to_owned()),
            ..ProductListQuery::default()
        };
        assert_eq!(
            query.criteria().tags,
            Some(vec!["design".to_owned(), "figma".to_owned()])
        );
    }

    #[rstest]
    #[case::default(None, 12)]
    #[case::zero(Some(0), 1)]
    #[case::huge(Some(5000), 100)]
    #[case::normal(Some(24), 24)]
    fn per_page_is_clamped(#[case] requested: Option<u32>, #[case] expected: u32) {
        let query = ProductListQuery {
            per_page: requested,
            ..ProductListQuery::default()
        };
        assert_eq!(query.per_page().get(), expected);
    }

    #[rstest]
    fn page_zero_is_clamped_to_one() {
        let query = ProductListQuery {
            page: Some(0),
            ..ProductListQuery::default()
        };
        assert_eq!(query.page().get(), 1);
    }

    #[rstest]
    fn unknown_sort_key_falls_back_to_created_at() {
        let query = ProductListQuery {
            sort_by: Some("upvotes".to_owned()),
            ..ProductListQuery::default()
        };
        assert_eq!(query.criteria().sort_by, Some(SortKey::CreatedAt));
    }
}
