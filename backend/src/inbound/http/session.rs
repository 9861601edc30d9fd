//! Session keys and access helpers.
//!
//! Session reads are best-effort: a corrupt or missing value is treated as
//! "absent", never as a fatal error, mirroring how the stored filter state
//! behaves on the client side.

use actix_session::Session;
use uuid::Uuid;

use super::error::ApiError;

/// Session key holding the authenticated account id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Session key holding the persisted filter criteria.
pub const FILTER_STATE_KEY: &str = "marketplace_filters";

/// The authenticated account id, when a valid one is present.
#[must_use]
pub fn current_user_id(session: &Session) -> Option<Uuid> {
    session.get::<Uuid>(SESSION_USER_KEY).ok().flatten()
}

/// The authenticated account id, or a 401 for anonymous callers.
///
/// # Errors
/// [`ApiError::unauthorized`] when no valid session is present.
pub fn require_user_id(session: &Session) -> Result<Uuid, ApiError> {
    current_user_id(session).ok_or_else(|| ApiError::unauthorized("Authentication required."))
}
