//! Session-persisted filter state.
//!
//! ```text
//! GET    /api/v1/filters
//! PUT    /api/v1/filters
//! DELETE /api/v1/filters
//! ```
//!
//! The store gives a returning session its previous filter selection and
//! the active-filter badge count. Reads are best-effort: corrupt or
//! missing state is simply an empty criteria set.

use actix_session::Session;
use actix_web::{HttpResponse, delete, get, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::FilterCriteria;

use super::error::{ApiError, ApiResponse, ApiResult, MessageResponse};
use super::session::FILTER_STATE_KEY;

/// Stored criteria plus the derived badge data.
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterStateResponse {
    /// The persisted criteria, default when nothing is stored.
    pub filters: FilterCriteria,
    /// Number of active constraints.
    pub active_filters: usize,
    /// Whether any constraint is active.
    pub has_active_filters: bool,
}

impl FilterStateResponse {
    fn from_criteria(filters: FilterCriteria) -> Self {
        let active_filters = filters.active_filter_count();
        Self {
            has_active_filters: active_filters > 0,
            active_filters,
            filters,
        }
    }
}

fn stored_criteria(session: &Session) -> FilterCriteria {
    session
        .get::<FilterCriteria>(FILTER_STATE_KEY)
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Read the persisted filter selection.
#[utoipa::path(
    get,
    path = "/api/v1/filters",
    responses(
        (status = 200, description = "Persisted filter state", body = FilterStateResponse)
    ),
    tags = ["filters"],
    operation_id = "getFilters"
)]
#[get("/filters")]
pub async fn get_filters(session: Session) -> ApiResult<HttpResponse> {
    let state = FilterStateResponse::from_criteria(stored_criteria(&session));
    Ok(HttpResponse::Ok().json(ApiResponse::success(state)))
}

/// Replace the persisted filter selection.
#[utoipa::path(
    put,
    path = "/api/v1/filters",
    responses(
        (status = 200, description = "Stored filter state", body = FilterStateResponse)
    ),
    tags = ["filters"],
    operation_id = "putFilters"
)]
#[put("/filters")]
pub async fn put_filters(
    session: Session,
    criteria: web::Json<FilterCriteria>,
) -> ApiResult<HttpResponse> {
    let criteria = criteria.into_inner();
    session
        .insert(FILTER_STATE_KEY, &criteria)
        .map_err(|error| ApiError::internal(format!("filter state not storable: {error}")))?;
    let state = FilterStateResponse::from_criteria(criteria);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Filters saved.", state)))
}

/// Clear the persisted filter selection.
#[utoipa::path(
    delete,
    path = "/api/v1/filters",
    responses(
        (status = 200, description = "Filters cleared", body = MessageResponse)
    ),
    tags = ["filters"],
    operation_id = "deleteFilters"
)]
#[delete("/filters")]
pub async fn delete_filters(session: Session) -> ApiResult<HttpResponse> {
    session.remove(FILTER_STATE_KEY);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Filters cleared.")))
}
