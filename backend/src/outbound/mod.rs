//! Driven adapters for upstream services.

pub mod offers;
