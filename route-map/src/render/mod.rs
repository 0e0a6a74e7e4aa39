//! Route map rendering.
//!
//! A reconciled route becomes a [`RenderGeometry`] (pure data), which
//! [`draw_route`] then draws onto any [`MapCanvas`]. The shipped canvas,
//! [`LeafletMap`], writes a self-contained Leaflet page.

mod canvas;
mod draw;
mod geometry;
mod leaflet;
mod templates;

use std::path::PathBuf;

pub use canvas::{Icon, MapCanvas, MapMarker, MapPolyline};
pub use draw::{ZOOM, draw_route, output_file_name, render_route};
pub use geometry::{Endpoints, RenderGeometry, StopMarker, build_geometry};
pub use leaflet::LeafletMap;
pub use templates::{
    EndpointPopupTemplate, InfoBoxTemplate, RouteMapTemplate, StopPopupTemplate, TextTemplate,
};

/// Errors that can occur while producing a map.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template rendering failed
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Map data could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The map was saved before anything centred it
    #[error("map has no centre")]
    NoCenter,
}
