//! Popular-tag endpoints.
//!
//! ```text
//! GET  /api/v1/tags/popular
//! POST /api/v1/tags/invalidate
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use super::error::{ApiResponse, ApiResult, MessageResponse};
use super::state::AppState;

/// Tags returned when the client does not ask for a count.
const DEFAULT_TAG_LIMIT: usize = 10;

/// Parameters for the popular-tags read.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct PopularTagsQuery {
    /// Maximum number of tags to return.
    pub limit: Option<usize>,
    /// Bypass the cache and refetch before answering.
    pub refresh: Option<bool>,
}

/// Read the popularity-ranked tag list.
#[utoipa::path(
    get,
    path = "/api/v1/tags/popular",
    params(PopularTagsQuery),
    responses(
        (status = 200, description = "Popularity-ranked tags")
    ),
    tags = ["tags"],
    operation_id = "popularTags"
)]
#[get("/tags/popular")]
pub async fn popular_tags(
    state: web::Data<AppState>,
    query: web::Query<PopularTagsQuery>,
) -> ApiResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_TAG_LIMIT);
    let force_refresh = query.refresh.unwrap_or(false);
    let tags = state.tags.popular_tags(limit, force_refresh).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tags)))
}

/// Drop the cached tag table and signal clients to refetch.
///
/// Meant to be called after any mutation that could change the tag
/// distribution, such as publishing a new listing.
#[utoipa::path(
    post,
    path = "/api/v1/tags/invalidate",
    responses(
        (status = 200, description = "Cache invalidated", body = MessageResponse)
    ),
    tags = ["tags"],
    operation_id = "invalidateTags"
)]
#[post("/tags/invalidate")]
pub async fn invalidate_tags(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    state.tags.invalidate();
    let version = state.bump_catalogue_version();
    tracing::info!(version, "tag cache invalidated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Tag cache invalidated.")))
}
