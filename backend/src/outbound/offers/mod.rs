//! Offers endpoint adapter.
//!
//! The HTTP source owns transport details only: request construction,
//! timeout and status mapping, and JSON decoding into raw offer records.
//! Normalization into products happens in the domain adapter, never here.

mod http_source;

pub use http_source::OffersHttpSource;
