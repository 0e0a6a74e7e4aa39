//! TAGO API response DTOs.
//!
//! These types map directly to the JSON form (`_type=json`) of the
//! `BusRouteInfoInqireService` responses. The service is loose about
//! shapes, so decoding is lenient here and validation happens in
//! `convert`:
//! - scalar fields arrive as strings or numbers depending on the value
//! - `items` is an empty string when there are no results
//! - `items.item` is an object for one result and an array for several

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub response: ApiResponse<T>,
}

/// The `response` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub header: Header,

    /// Missing on some error responses.
    #[serde(default)]
    pub body: Option<Body<T>>,
}

/// Result status of the call.
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    /// `"00"` on success, `"03"` when no data matched.
    #[serde(rename = "resultCode", default, deserialize_with = "loose_string")]
    pub result_code: Option<String>,

    /// e.g. `"NORMAL SERVICE."` or `"NODATA_ERROR"`.
    #[serde(rename = "resultMsg", default, deserialize_with = "loose_string")]
    pub result_msg: Option<String>,
}

/// Paged result body.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Body<T> {
    #[serde(default = "Vec::new", deserialize_with = "items")]
    pub items: Vec<T>,

    #[serde(rename = "numOfRows", default, deserialize_with = "loose_u64")]
    pub num_of_rows: Option<u64>,

    #[serde(rename = "pageNo", default, deserialize_with = "loose_u64")]
    pub page_no: Option<u64>,

    #[serde(rename = "totalCount", default, deserialize_with = "loose_u64")]
    pub total_count: Option<u64>,
}

/// One route from `getRouteNoList`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteItem {
    #[serde(rename = "routeid", default, deserialize_with = "loose_string")]
    pub route_id: Option<String>,

    /// Route number as printed on the bus. Often a JSON number.
    #[serde(rename = "routeno", default, deserialize_with = "loose_string")]
    pub route_no: Option<String>,

    /// Service category label, e.g. `간선버스`.
    #[serde(rename = "routetp", default, deserialize_with = "loose_string")]
    pub route_type: Option<String>,

    #[serde(rename = "startnodenm", default, deserialize_with = "loose_string")]
    pub start_node_name: Option<String>,

    #[serde(rename = "endnodenm", default, deserialize_with = "loose_string")]
    pub end_node_name: Option<String>,
}

/// One stop from `getRouteAcctoThrghSttnList`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopItem {
    #[serde(rename = "nodeid", default, deserialize_with = "loose_string")]
    pub node_id: Option<String>,

    #[serde(rename = "nodenm", default, deserialize_with = "loose_string")]
    pub node_name: Option<String>,

    /// 1-based position within the direction.
    #[serde(rename = "nodeord", default, deserialize_with = "loose_string")]
    pub node_order: Option<String>,

    #[serde(rename = "gpslati", default, deserialize_with = "loose_string")]
    pub gps_lat: Option<String>,

    #[serde(rename = "gpslong", default, deserialize_with = "loose_string")]
    pub gps_lon: Option<String>,

    /// Direction flag, `0` or `1`.
    #[serde(rename = "updowncd", default, deserialize_with = "loose_string")]
    pub up_down_code: Option<String>,
}

/// Accept a string, number or bool and normalise it to a string.
///
/// Null, objects and arrays become `None` so one malformed field only
/// invalidates its own item.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => None,
    })
}

/// Accept a count as a number or a numeric string. Anything else is `None`.
fn loose_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_string(deserializer)?.and_then(|s| s.trim().parse().ok()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
enum ItemsField<T> {
    Wrapped {
        #[serde(default)]
        item: Option<OneOrMany<T>>,
    },
    /// The API sends `"items": ""` for an empty page.
    Blank(String),
}

fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let field = Option::<ItemsField<T>>::deserialize(deserializer)?;
    Ok(match field {
        Some(ItemsField::Wrapped {
            item: Some(OneOrMany::Many(items)),
        }) => items,
        Some(ItemsField::Wrapped {
            item: Some(OneOrMany::One(item)),
        }) => vec![item],
        Some(ItemsField::Wrapped { item: None }) | Some(ItemsField::Blank(_)) | None => Vec::new(),
    })
}
