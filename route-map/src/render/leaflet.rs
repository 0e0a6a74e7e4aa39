//! Leaflet HTML map writer.

use std::path::Path;

use askama::Template;
use serde::Serialize;

use crate::domain::Coord;

use super::canvas::{MapCanvas, MapMarker, MapPolyline};
use super::RenderError;
use super::templates::{RouteMapTemplate, TextTemplate};

#[derive(Serialize)]
struct LineView<'a> {
    coords: &'a [Coord],
    label: String,
    color: &'a str,
}

#[derive(Serialize)]
struct MarkerView<'a> {
    at: Coord,
    tooltip: String,
    popup: &'a str,
    color: &'a str,
    glyph: &'a str,
}

/// A map page built up in memory and written as one HTML file.
///
/// Lines and markers are drawn in the order they were added, so later
/// additions sit on top.
#[derive(Debug, Clone, Default)]
pub struct LeafletMap {
    title: String,
    view: Option<(Coord, u8)>,
    lines: Vec<MapPolyline>,
    markers: Vec<MapMarker>,
    annotations: Vec<String>,
}

impl LeafletMap {
    /// Create an empty map with the given page title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Render the page without writing it.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let (center, zoom) = self.view.ok_or(RenderError::NoCenter)?;

        let lines = self
            .lines
            .iter()
            .map(|l| {
                Ok(LineView {
                    coords: &l.coords,
                    label: escape_text(&l.label)?,
                    color: l.color,
                })
            })
            .collect::<Result<Vec<LineView<'_>>, RenderError>>()?;

        let markers = self
            .markers
            .iter()
            .map(|m| {
                Ok(MarkerView {
                    at: m.at,
                    tooltip: escape_text(&m.tooltip)?,
                    popup: &m.popup_html,
                    color: m.icon.color(),
                    glyph: m.icon.glyph(),
                })
            })
            .collect::<Result<Vec<MarkerView<'_>>, RenderError>>()?;

        let template = RouteMapTemplate {
            title: self.title.clone(),
            generated_at: chrono::Local::now().to_rfc3339(),
            zoom,
            center_json: script_json(&center)?,
            lines_json: script_json(&lines)?,
            markers_json: script_json(&markers)?,
            annotations: self.annotations.clone(),
        };
        Ok(template.render()?)
    }
}

impl MapCanvas for LeafletMap {
    fn center(&mut self, at: Coord, zoom: u8) {
        self.view = Some((at, zoom));
    }

    fn polyline(&mut self, line: MapPolyline) {
        self.lines.push(line);
    }

    fn marker(&mut self, marker: MapMarker) {
        self.markers.push(marker);
    }

    fn annotate(&mut self, html: String) {
        self.annotations.push(html);
    }

    /// Write the page, creating parent directories if needed.
    fn save(&mut self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, html).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Leaflet renders tooltips as HTML, so plain text is escaped first.
fn escape_text(text: &str) -> Result<String, RenderError> {
    Ok(TextTemplate { text }.render()?)
}

/// JSON that is safe to embed in a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Icon;
    use tempfile::tempdir;

    fn coord(lat: f64, lon: f64) -> Coord {
        Coord::new(lat, lon).unwrap()
    }

    fn sample_map() -> LeafletMap {
        let mut map = LeafletMap::new("102번");
        map.center(coord(36.3, 127.4), 12);
        map.polyline(MapPolyline {
            coords: vec![coord(36.3, 127.4), coord(36.4, 127.5)],
            label: "102번 (기점→종점)".into(),
            color: "red",
        });
        map.marker(MapMarker {
            at: coord(36.3, 127.4),
            tooltip: "</script><b>".into(),
            popup_html: "<b>원내동</b>".into(),
            icon: Icon::Origin,
        });
        map.annotate("<div class=\"note\">hi</div>".into());
        map
    }

    #[test]
    fn requires_a_center() {
        let map = LeafletMap::new("empty");
        assert!(matches!(map.to_html(), Err(RenderError::NoCenter)));
    }

    #[test]
    fn page_contains_layers() {
        let html = sample_map().to_html().unwrap();

        assert!(html.contains("<title>102번</title>"));
        assert!(html.contains("setView(center, 12)"));
        assert!(html.contains("[36.3,127.4]"));
        assert!(html.contains("\"color\":\"red\""));
        assert!(html.contains("\"glyph\":\"play\""));
        assert!(html.contains("\"color\":\"green\""));
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn tooltips_cannot_close_the_script() {
        let html = sample_map().to_html().unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("map.html");

        sample_map().save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
