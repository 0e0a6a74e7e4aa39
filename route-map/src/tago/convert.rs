//! Conversion from TAGO DTOs to domain types.
//!
//! This is the validation boundary: items that cannot become a valid
//! [`RouteRecord`] or [`Stop`] are logged and skipped here, so nothing
//! downstream sees a half-filled record.

use crate::domain::{
    Coord, DirectionCode, RawDirectionSet, RouteId, RouteRecord, RouteType, Stop,
};

use super::error::TagoError;
use super::types::{Body, Envelope, Header, RouteItem, StopItem};

/// Result code of a successful call.
const RESULT_OK: &str = "00";

/// Result code of a call that matched nothing.
const RESULT_NO_DATA: &str = "03";

/// Result message of a call that matched nothing.
const MSG_NO_DATA: &str = "NODATA_ERROR";

/// How much of an undecodable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Why a single upstream item was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A required field was absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field did not hold a usable number
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// The direction flag was neither 0 nor 1
    #[error("unrecognised direction flag: {0:?}")]
    UnknownDirection(String),
}

/// Outcome of checking a response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Normal,
    NoData,
}

/// Classify a response header.
///
/// "No data" is a valid empty outcome. Any other non-`00` code is a
/// failure.
pub fn check_header(header: &Header) -> Result<ResultStatus, TagoError> {
    let code = header.result_code.as_deref().map(str::trim).unwrap_or("");
    let msg = header.result_msg.as_deref().map(str::trim).unwrap_or("");

    if code == RESULT_OK {
        return Ok(ResultStatus::Normal);
    }
    if code == RESULT_NO_DATA || msg == MSG_NO_DATA {
        return Ok(ResultStatus::NoData);
    }
    Err(TagoError::Api {
        code: code.to_string(),
        message: msg.to_string(),
    })
}

/// Decode a raw response body.
pub fn decode<T>(body: &str) -> Result<Envelope<T>, TagoError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| TagoError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

/// Convert a `getRouteNoList` response into the routes whose number is
/// exactly `route_no`.
///
/// The upstream search is fuzzy (asking for `102` also returns `102-1`),
/// so the exact filter is applied here.
pub fn convert_route_list(
    envelope: Envelope<RouteItem>,
    route_no: &str,
) -> Result<Vec<RouteRecord>, TagoError> {
    let Some(body) = successful_body(envelope)? else {
        return Ok(Vec::new());
    };
    warn_if_truncated(&body, "route list");

    let found = body.items.len();
    let routes: Vec<RouteRecord> = body
        .items
        .iter()
        .filter_map(|item| match convert_route_item(item) {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::warn!(route_id = ?item.route_id, "skipping route: {e}");
                None
            }
        })
        .filter(|route| route.number == route_no)
        .collect();

    tracing::debug!(found, exact = routes.len(), route_no, "route lookup");
    Ok(routes)
}

/// Convert one route item.
pub fn convert_route_item(item: &RouteItem) -> Result<RouteRecord, ConversionError> {
    let id = item
        .route_id
        .as_deref()
        .and_then(|id| RouteId::new(id).ok())
        .ok_or(ConversionError::MissingField("routeid"))?;
    let number = item
        .route_no
        .clone()
        .filter(|no| !no.trim().is_empty())
        .ok_or(ConversionError::MissingField("routeno"))?;

    Ok(RouteRecord {
        id,
        number,
        route_type: RouteType::from_label(item.route_type.as_deref().unwrap_or("")),
        declared_origin: trimmed(item.start_node_name.as_deref()),
        declared_terminus: trimmed(item.end_node_name.as_deref()),
    })
}

/// Convert a `getRouteAcctoThrghSttnList` response into per-direction
/// stop sequences.
///
/// Invalid stops are dropped with a warning; they never fail the fetch.
pub fn convert_stop_list(envelope: Envelope<StopItem>) -> Result<RawDirectionSet, TagoError> {
    let Some(body) = successful_body(envelope)? else {
        return Ok(RawDirectionSet::default());
    };
    warn_if_truncated(&body, "stop list");

    let mut code0 = Vec::new();
    let mut code1 = Vec::new();

    for item in &body.items {
        match convert_stop_item(item) {
            Ok((DirectionCode::Code0, stop)) => code0.push(stop),
            Ok((DirectionCode::Code1, stop)) => code1.push(stop),
            Err(e @ ConversionError::UnknownDirection(_)) => {
                tracing::debug!(node_id = ?item.node_id, "skipping stop: {e}");
            }
            Err(e) => {
                tracing::warn!(
                    node_id = ?item.node_id,
                    name = ?item.node_name,
                    "dropping stop: {e}"
                );
            }
        }
    }

    Ok(RawDirectionSet::from_unsorted(code0, code1))
}

/// Convert one stop item, returning its direction alongside it.
pub fn convert_stop_item(item: &StopItem) -> Result<(DirectionCode, Stop), ConversionError> {
    let order = parse_order(item.node_order.as_deref())?;
    let lat = parse_float("gpslati", item.gps_lat.as_deref())?;
    let lon = parse_float("gpslong", item.gps_lon.as_deref())?;
    let coord = Coord::new(lat, lon).ok_or_else(|| ConversionError::InvalidNumber {
        field: "gpslati/gpslong",
        value: format!("{lat},{lon}"),
    })?;

    let raw_direction = item.up_down_code.as_deref().unwrap_or("");
    let direction = DirectionCode::parse(raw_direction)
        .ok_or_else(|| ConversionError::UnknownDirection(raw_direction.to_string()))?;

    let name = trimmed(item.node_name.as_deref());
    Ok((direction, Stop::new(name, order, coord)))
}

/// Unwrap the body of a successful response; `None` means "no data".
fn successful_body<T>(envelope: Envelope<T>) -> Result<Option<Body<T>>, TagoError> {
    let response = envelope.response;
    match check_header(&response.header)? {
        ResultStatus::NoData => Ok(None),
        ResultStatus::Normal => Ok(response.body),
    }
}

fn warn_if_truncated<T>(body: &Body<T>, what: &'static str) {
    if let Some(total) = body.total_count
        && total > body.items.len() as u64
    {
        tracing::warn!(
            total,
            received = body.items.len(),
            "{what} truncated; raise the page size"
        );
    }
}

fn parse_order(raw: Option<&str>) -> Result<u32, ConversionError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or(ConversionError::MissingField("nodeord"))?;
    match raw.parse::<u32>() {
        Ok(order) if order >= 1 => Ok(order),
        _ => Err(ConversionError::InvalidNumber {
            field: "nodeord",
            value: raw.to_string(),
        }),
    }
}

fn parse_float(field: &'static str, raw: Option<&str>) -> Result<f64, ConversionError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or(ConversionError::MissingField(field))?;
    raw.parse::<f64>().map_err(|_| ConversionError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn trimmed(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}
