//! HTTP inbound adapters.
//!
//! Handlers stay thin: extract, call a domain service, wrap the outcome in
//! the response envelope. Anything with actual logic lives in the domain.

pub mod auth;
pub mod error;
pub mod filters;
pub mod health;
pub mod products;
pub mod session;
pub mod state;
pub mod tags;

pub use error::{ApiError, ApiResponse, ApiResult, MessageResponse};
pub use state::AppState;
