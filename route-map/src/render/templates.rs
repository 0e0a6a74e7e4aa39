//! Askama templates for the map page.

use askama::Template;

/// The full map page.
#[derive(Template)]
#[template(path = "route_map.html")]
pub struct RouteMapTemplate {
    pub title: String,
    pub generated_at: String,
    pub zoom: u8,
    /// `[lat, lon]` as JSON.
    pub center_json: String,
    /// Lines as a JSON array.
    pub lines_json: String,
    /// Markers as a JSON array.
    pub markers_json: String,
    /// Raw HTML blocks overlaid on the map.
    pub annotations: Vec<String>,
}

/// Route summary box in the corner of the map.
#[derive(Template)]
#[template(path = "info_box.html")]
pub struct InfoBoxTemplate {
    pub title: String,
    pub origin: String,
    pub terminus: String,
    /// CSS colour of the border and title bar.
    pub color: String,
}

/// Popup of an ordinary stop.
#[derive(Template)]
#[template(source = "<b>{{ name }}</b><br>({{ order }}번째)", ext = "html")]
pub struct StopPopupTemplate<'a> {
    pub name: &'a str,
    pub order: u32,
}

/// Popup of an origin or terminus marker.
#[derive(Template)]
#[template(source = "<b>{{ role }}: {{ name }}</b>", ext = "html")]
pub struct EndpointPopupTemplate<'a> {
    pub role: &'a str,
    pub name: &'a str,
}

/// Plain text made safe for places Leaflet treats as HTML.
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
pub struct TextTemplate<'a> {
    pub text: &'a str,
}
