//! Reqwest-backed offer source adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::offer::RawOffer;
use crate::domain::ports::{OfferSource, OfferSourceError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Offer source that reads `GET {base}/offers` and `GET {base}/offers/{id}`.
pub struct OffersHttpSource {
    client: Client,
    base: Url,
}

impl OffersHttpSource {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn offers_url(&self, id: Option<u64>) -> Result<Url, OfferSourceError> {
        let base = self.base.as_str().trim_end_matches('/');
        let raw = match id {
            Some(id) => format!("{base}/offers/{id}"),
            None => format!("{base}/offers"),
        };
        Url::parse(&raw)
            .map_err(|error| OfferSourceError::transport(format!("invalid offers URL: {error}")))
    }

    async fn get_bytes(&self, url: Url) -> Result<(StatusCode, Vec<u8>), OfferSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl OfferSource for OffersHttpSource {
    async fn fetch_offers(&self) -> Result<Vec<RawOffer>, OfferSourceError> {
        let url = self.offers_url(None)?;
        let (status, body) = self.get_bytes(url).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        decode_offers(&body)
    }

    async fn fetch_offer(&self, id: u64) -> Result<Option<RawOffer>, OfferSourceError> {
        let url = self.offers_url(Some(id))?;
        let (status, body) = self.get_bytes(url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        decode_offer(&body).map(Some)
    }
}

/// The offers endpoint answers either with a bare array or with a
/// `{"data": [...]}` envelope depending on upstream version; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OffersPayload {
    Bare(Vec<RawOffer>),
    Enveloped {
        #[serde(default)]
        data: Vec<RawOffer>,
    },
}

fn decode_offers(body: &[u8]) -> Result<Vec<RawOffer>, OfferSourceError> {
    let payload: OffersPayload = serde_json::from_slice(body)
        .map_err(|error| OfferSourceError::decode(format!("invalid offers payload: {error}")))?;
    Ok(match payload {
        OffersPayload::Bare(offers) => offers,
        OffersPayload::Enveloped { data } => data,
    })
}

// `Enveloped` must be tried first: a lenient `RawOffer` accepts any JSON
// object, so the bare variant would otherwise swallow `{"data": ...}` too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OfferPayload {
    Enveloped { data: Box<RawOffer> },
    Bare(Box<RawOffer>),
}

fn decode_offer(body: &[u8]) -> Result<RawOffer, OfferSourceError> {
    let payload: OfferPayload = serde_json::from_slice(body)
        .map_err(|error| OfferSourceError::decode(format!("invalid offer payload: {error}")))?;
    Ok(match payload {
        OfferPayload::Bare(offer) | OfferPayload::Enveloped { data: offer } => *offer,
    })
}

fn map_transport_error(error: reqwest::Error) -> OfferSourceError {
    if error.is_timeout() {
        OfferSourceError::timeout(error.to_string())
    } else {
        OfferSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> OfferSourceError {
    let preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            OfferSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => OfferSourceError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network decoding and mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_a_bare_offer_array() {
        let body = br#"[{"id": 1, "title": "Kit"}, {"id": "2"}]"#;
        let offers = decode_offers(body).expect("bare arrays should decode");
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].title.as_deref(), Some("Kit"));
    }

    #[rstest]
    fn decodes_an_enveloped_offer_array() {
        let body = br#"{"data": [{"id": 7, "title": "Course"}]}"#;
        let offers = decode_offers(body).expect("envelopes should decode");
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].title.as_deref(), Some("Course"));
    }

    #[rstest]
    fn rejects_non_offer_payloads() {
        let error = decode_offers(b"\"just a string\"").expect_err("must not decode");
        assert!(matches!(error, OfferSourceError::Decode { .. }));
    }

    #[rstest]
    fn decodes_a_single_offer_in_either_shape() {
        let bare = decode_offer(br#"{"id": 3, "title": "Audit"}"#).expect("bare offer decodes");
        assert_eq!(bare.title.as_deref(), Some("Audit"));

        let envelope =
            decode_offer(br#"{"data": {"id": 3, "title": "Audit"}}"#).expect("envelope decodes");
        assert_eq!(envelope.title.as_deref(), Some("Audit"));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT)]
    fn timeout_statuses_map_to_timeout(#[case] status: StatusCode) {
        let error = map_status_error(status, b"");
        assert!(matches!(error, OfferSourceError::Timeout { .. }));
    }

    #[rstest]
    fn other_statuses_carry_code_and_preview() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"upstream   exploded");
        let OfferSourceError::Status { status, message } = error else {
            panic!("expected a status error");
        };
        assert_eq!(status, 502);
        assert_eq!(message, "upstream exploded");
    }

    #[rstest]
    fn body_preview_is_bounded() {
        let long = "word ".repeat(100);
        let preview = body_preview(long.as_bytes());
        assert!(preview.chars().count() <= 163, "preview should stay bounded");
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    fn url_building_handles_trailing_slashes() {
        let source = OffersHttpSource::new(
            Url::parse("http://localhost:8000/api/").expect("valid base"),
        )
        .expect("client should build");

        let list = source.offers_url(None).expect("list URL should build");
        assert_eq!(list.as_str(), "http://localhost:8000/api/offers");

        let single = source.offers_url(Some(42)).expect("single URL should build");
        assert_eq!(single.as_str(), "http://localhost:8000/api/offers/42");
    }
}
