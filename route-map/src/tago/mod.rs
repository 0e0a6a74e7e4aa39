//! TAGO bus route information client.
//!
//! This module provides an HTTP client for the Korean national transit
//! open-data service (`BusRouteInfoInqireService` on data.go.kr).
//!
//! Key characteristics of the service:
//! - Route search by number is fuzzy; exact matching is done locally
//! - "No data" is reported through the result code, not an HTTP status
//! - Stops carry a direction flag (`updowncd`) whose meaning differs
//!   between routes, so it is only a hint (see [`crate::reconcile`])

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, TagoClient, TagoConfig};
pub use convert::{ConversionError, ResultStatus};
pub use error::TagoError;
pub use mock::MockTagoClient;
pub use types::{Envelope, Header, RouteItem, StopItem};
