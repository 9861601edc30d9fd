//! Domain ports for driven adapters.
//!
//! The catalogue only ever consumes offers through [`OfferSource`], so the
//! HTTP-backed source and the embedded fallback dataset are interchangeable
//! and the pipeline behaves identically over either.

use async_trait::async_trait;
use thiserror::Error;

use super::offer::RawOffer;

/// Upstream supplier of raw offer records.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch the whole offer collection.
    async fn fetch_offers(&self) -> Result<Vec<RawOffer>, OfferSourceError>;

    /// Fetch a single offer by its upstream identifier.
    ///
    /// `Ok(None)` means the source answered and the offer does not exist;
    /// errors mean the source could not answer at all.
    async fn fetch_offer(&self, id: u64) -> Result<Option<RawOffer>, OfferSourceError>;
}

/// Failures an [`OfferSource`] can surface.
///
/// Listing callers never see these: the fetch orchestrator logs them and
/// degrades to the fallback dataset.
#[derive(Debug, Error)]
pub enum OfferSourceError {
    /// The source was unreachable.
    #[error("offer source transport failure: {message}")]
    Transport {
        /// Transport-level failure description.
        message: String,
    },
    /// The source did not answer in time.
    #[error("offer source timed out: {message}")]
    Timeout {
        /// Timeout description.
        message: String,
    },
    /// The source answered with a non-success HTTP status.
    #[error("offer source returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body preview.
        message: String,
    },
    /// The payload was not decodable as offer records.
    #[error("offer payload could not be decoded: {message}")]
    Decode {
        /// Decode failure description.
        message: String,
    },
}

impl OfferSourceError {
    /// Build a transport failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a timeout failure.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build a non-success status failure.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a decode failure.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
