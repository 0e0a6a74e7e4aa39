//! TAGO bus route HTTP client.
//!
//! Provides async methods for the two read-only queries the route map
//! needs: list routes by number, and list stops by route id.

use std::time::Duration;

use crate::config::validate_service_key;
use crate::domain::{RawDirectionSet, RouteId, RouteRecord};

use super::convert::{convert_route_list, convert_stop_list, decode};
use super::error::TagoError;
use super::types::{RouteItem, StopItem};

/// Default base URL for the bus route information service.
pub const DEFAULT_BASE_URL: &str = "http://apis.data.go.kr/1613000/BusRouteInfoInqireService";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Page size for route lookups.
const DEFAULT_ROUTE_ROWS: u32 = 100;

/// Page size for stop lists. Long routes have a few hundred stops.
const DEFAULT_STOP_ROWS: u32 = 500;

/// Configuration for the TAGO client.
#[derive(Debug, Clone)]
pub struct TagoConfig {
    /// data.go.kr service key, in its decoded form
    pub service_key: String,
    /// City code, e.g. `25` for Daejeon
    pub city_code: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// `numOfRows` for route lookups
    pub route_rows: u32,
    /// `numOfRows` for stop lists
    pub stop_rows: u32,
}

impl TagoConfig {
    /// Create a new config with the given service key and city code.
    pub fn new(service_key: impl Into<String>, city_code: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            city_code: city_code.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            route_rows: DEFAULT_ROUTE_ROWS,
            stop_rows: DEFAULT_STOP_ROWS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set page sizes for route and stop queries.
    pub fn with_page_sizes(mut self, route_rows: u32, stop_rows: u32) -> Self {
        self.route_rows = route_rows;
        self.stop_rows = stop_rows;
        self
    }
}

/// TAGO bus route API client.
#[derive(Debug, Clone)]
pub struct TagoClient {
    http: reqwest::Client,
    config: TagoConfig,
}

impl TagoClient {
    /// Create a new client.
    ///
    /// Fails before any network activity if the service key is missing or
    /// still the placeholder value.
    pub fn new(config: TagoConfig) -> Result<Self, TagoError> {
        validate_service_key(&config.service_key)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// The city this client queries.
    pub fn city_code(&self) -> &str {
        &self.config.city_code
    }

    /// List routes whose number is exactly `route_no`.
    ///
    /// "No data" from the API is an empty list, not an error.
    pub async fn find_routes(&self, route_no: &str) -> Result<Vec<RouteRecord>, TagoError> {
        let rows = self.config.route_rows.to_string();
        let body = self
            .get("getRouteNoList", &[("routeNo", route_no), ("numOfRows", rows.as_str())])
            .await?;

        convert_route_list(decode::<RouteItem>(&body)?, route_no)
    }

    /// List the stops of a route, split by direction flag.
    pub async fn route_stops(&self, route_id: &RouteId) -> Result<RawDirectionSet, TagoError> {
        let rows = self.config.stop_rows.to_string();
        let body = self
            .get(
                "getRouteAcctoThrghSttnList",
                &[("routeId", route_id.as_str()), ("numOfRows", rows.as_str())],
            )
            .await?;

        let set = convert_stop_list(decode::<StopItem>(&body)?)?;
        tracing::debug!(
            route_id = %route_id,
            code0 = set.code0.len(),
            code1 = set.code1.len(),
            "fetched stops"
        );
        Ok(set)
    }

    /// Issue one GET and return the body text of a successful response.
    async fn get(&self, operation: &str, params: &[(&str, &str)]) -> Result<String, TagoError> {
        let url = format!("{}/{}", self.config.base_url, operation);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("serviceKey", self.config.service_key.as_str()),
                ("cityCode", self.config.city_code.as_str()),
                ("_type", "json"),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TagoError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
