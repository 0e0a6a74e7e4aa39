//! The map drawing surface.
//!
//! [`MapCanvas`] is the narrow interface the route renderer draws through.
//! [`super::LeafletMap`] is the shipped implementation; tests use a
//! recording one.

use std::path::Path;

use crate::domain::Coord;

use super::RenderError;

/// Marker icon categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// An ordinary stop.
    Stop,
    /// Start of the outbound trip.
    Origin,
    /// End of the outbound trip, where the bus turns back.
    Terminus,
    /// Start and end of a circular route.
    Loop,
}

impl Icon {
    /// Marker colour.
    pub fn color(self) -> &'static str {
        match self {
            Icon::Stop => "gray",
            Icon::Origin => "green",
            Icon::Terminus => "red",
            Icon::Loop => "purple",
        }
    }

    /// Glyph drawn inside the marker.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Stop => "info-sign",
            Icon::Origin => "play",
            Icon::Terminus => "stop",
            Icon::Loop => "refresh",
        }
    }
}

/// A point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub at: Coord,
    /// Plain text shown on hover.
    pub tooltip: String,
    /// HTML shown on click. Callers escape any data they embed.
    pub popup_html: String,
    pub icon: Icon,
}

/// A directed line through ordered coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPolyline {
    pub coords: Vec<Coord>,
    /// Plain text shown on hover, naming the direction.
    pub label: String,
    pub color: &'static str,
}

/// A surface a route map is drawn on.
pub trait MapCanvas {
    /// Centre the view on `at` at `zoom`.
    fn center(&mut self, at: Coord, zoom: u8);

    fn polyline(&mut self, line: MapPolyline);

    fn marker(&mut self, marker: MapMarker);

    /// Add a block of HTML/CSS overlaid on the map.
    fn annotate(&mut self, html: String);

    /// Write the finished map to `path`.
    fn save(&mut self, path: &Path) -> Result<(), RenderError>;
}
