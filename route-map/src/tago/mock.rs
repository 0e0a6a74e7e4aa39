//! Mock TAGO client for running without API access.
//!
//! Serves recorded API responses from a directory and decodes them through
//! the same conversion path as the live client.
//!
//! Expected layout:
//!
//! ```text
//! <dir>/routes.json            getRouteNoList response
//! <dir>/stops/<routeId>.json   getRouteAcctoThrghSttnList response per route
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{RawDirectionSet, RouteId, RouteRecord};

use super::convert::{convert_route_list, convert_stop_list, decode};
use super::error::TagoError;
use super::types::{RouteItem, StopItem};

/// Mock TAGO client that serves recorded JSON responses.
#[derive(Debug, Clone)]
pub struct MockTagoClient {
    /// Raw route list body.
    routes: String,
    /// Raw stop list bodies, keyed by route id.
    stops: HashMap<String, String>,
}

impl MockTagoClient {
    /// Load recorded responses from `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TagoError> {
        let data_dir = data_dir.as_ref();

        let routes_path = data_dir.join("routes.json");
        let routes = std::fs::read_to_string(&routes_path).map_err(|e| {
            TagoError::Fixture(format!("failed to read {}: {e}", routes_path.display()))
        })?;

        let stops_dir = data_dir.join("stops");
        let entries = std::fs::read_dir(&stops_dir).map_err(|e| {
            TagoError::Fixture(format!("failed to read {}: {e}", stops_dir.display()))
        })?;

        let mut stops = HashMap::new();
        for entry in entries {
            let path = entry
                .map_err(|e| TagoError::Fixture(format!("failed to read directory entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // "DJB30300002.json" -> "DJB30300002"
            let route_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| TagoError::Fixture(format!("invalid filename: {}", path.display())))?
                .to_string();

            let body = std::fs::read_to_string(&path).map_err(|e| {
                TagoError::Fixture(format!("failed to read {}: {e}", path.display()))
            })?;
            stops.insert(route_id, body);
        }

        Ok(Self { routes, stops })
    }

    /// Mimics [`super::TagoClient::find_routes`].
    pub async fn find_routes(&self, route_no: &str) -> Result<Vec<RouteRecord>, TagoError> {
        convert_route_list(decode::<RouteItem>(&self.routes)?, route_no)
    }

    /// Mimics [`super::TagoClient::route_stops`].
    ///
    /// A route with no recorded stops answers like the API does when it has
    /// nothing: an empty set.
    pub async fn route_stops(&self, route_id: &RouteId) -> Result<RawDirectionSet, TagoError> {
        match self.stops.get(route_id.as_str()) {
            Some(body) => convert_stop_list(decode::<StopItem>(body)?),
            None => Ok(RawDirectionSet::default()),
        }
    }

    /// Route ids with recorded stop data.
    pub fn available_routes(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.stops.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_DIR: &str = "data/mock";

    #[test]
    fn load_mock_data() {
        let client = MockTagoClient::new(DATA_DIR).unwrap();
        assert!(client.available_routes().contains(&"DJB30300002"));
    }

    #[test]
    fn missing_directory_is_fixture_error() {
        let err = MockTagoClient::new("/nonexistent/mock").unwrap_err();
        assert!(matches!(err, TagoError::Fixture(_)));
    }

    #[tokio::test]
    async fn find_routes_is_exact() {
        let client = MockTagoClient::new(DATA_DIR).unwrap();

        let routes = client.find_routes("102").await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id.as_str(), "DJB30300002");

        let routes = client.find_routes("5").await.unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.number == "5"));

        assert!(client.find_routes("999").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn route_stops_drops_bad_coordinates() {
        let client = MockTagoClient::new(DATA_DIR).unwrap();
        let id = RouteId::new("DJB30300002").unwrap();

        let set = client.route_stops(&id).await.unwrap();
        assert!(!set.code0.is_empty());
        assert!(!set.code1.is_empty());
        assert!(set.code0.iter().all(|s| s.name != "좌표없음"));
        assert!(set.code0.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[tokio::test]
    async fn unknown_route_has_no_stops() {
        let client = MockTagoClient::new(DATA_DIR).unwrap();
        let id = RouteId::new("NOPE").unwrap();
        assert!(client.route_stops(&id).await.unwrap().is_empty());
    }
}
