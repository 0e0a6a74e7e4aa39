//! Render geometry for a reconciled route.

use crate::domain::{Coord, Stop};
use crate::reconcile::CanonicalPath;

/// A stop as it appears on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct StopMarker {
    pub at: Coord,
    pub name: String,
    /// Position within the stop's own direction.
    pub order: u32,
}

impl From<&Stop> for StopMarker {
    fn from(stop: &Stop) -> Self {
        Self {
            at: stop.coord,
            name: stop.name.clone(),
            order: stop.order,
        }
    }
}

/// The special points of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoints {
    /// Out-and-back route: separate origin and turn-back terminus.
    Linear {
        origin: StopMarker,
        terminus: StopMarker,
    },
    /// Loop: one point is both origin and terminus.
    Loop { origin: StopMarker },
}

impl Endpoints {
    pub fn origin(&self) -> &StopMarker {
        match self {
            Endpoints::Linear { origin, .. } | Endpoints::Loop { origin } => origin,
        }
    }
}

/// Everything needed to draw one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGeometry {
    /// Outbound line. For loops, closed back onto its first point.
    pub outbound: Vec<Coord>,
    /// Inbound line starting at the turn-back point. Empty for loops.
    pub inbound: Vec<Coord>,
    pub endpoints: Endpoints,
    /// One marker per stop in outbound then inbound order.
    pub stops: Vec<StopMarker>,
}

impl RenderGeometry {
    pub fn is_circular(&self) -> bool {
        matches!(self.endpoints, Endpoints::Loop { .. })
    }

    /// Where the map is centred.
    pub fn center(&self) -> Coord {
        self.endpoints.origin().at
    }
}

/// Build the geometry for `path`, or `None` when it has no stops.
pub fn build_geometry(path: &CanonicalPath) -> Option<RenderGeometry> {
    let origin = path.origin()?;

    let mut outbound: Vec<Coord> = path.outbound().iter().map(|s| s.coord).collect();
    let mut inbound = Vec::new();

    let endpoints = if path.is_circular() {
        outbound.push(origin.coord);
        Endpoints::Loop {
            origin: origin.into(),
        }
    } else {
        // Stitch the two lines together at the turn-back point.
        let turn_back = outbound[outbound.len() - 1];
        inbound.reserve(path.inbound().len() + 1);
        inbound.push(turn_back);
        inbound.extend(path.inbound().iter().map(|s| s.coord));

        let terminus = path.terminus().unwrap_or(origin);
        Endpoints::Linear {
            origin: origin.into(),
            terminus: terminus.into(),
        }
    };

    let stops = path
        .outbound()
        .iter()
        .chain(path.inbound())
        .map(StopMarker::from)
        .collect();

    Some(RenderGeometry {
        outbound,
        inbound,
        endpoints,
        stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawDirectionSet;
    use crate::reconcile::reconcile;

    fn coord(lat: f64, lon: f64) -> Coord {
        Coord::new(lat, lon).unwrap()
    }

    fn stop(name: &str, order: u32, lat: f64, lon: f64) -> Stop {
        Stop::new(name, order, coord(lat, lon))
    }

    #[test]
    fn loop_is_closed_on_its_first_point() {
        let raw = RawDirectionSet {
            code0: vec![
                stop("A", 1, 36.1, 127.1),
                stop("B", 2, 36.2, 127.2),
                stop("C", 3, 36.3, 127.3),
            ],
            code1: vec![],
        };
        let path = reconcile(raw, "A", "C");

        let geometry = build_geometry(&path).unwrap();
        assert!(geometry.is_circular());
        assert_eq!(
            geometry.outbound,
            [
                coord(36.1, 127.1),
                coord(36.2, 127.2),
                coord(36.3, 127.3),
                coord(36.1, 127.1)
            ]
        );
        assert!(geometry.inbound.is_empty());
        assert_eq!(geometry.endpoints.origin().name, "A");
        assert_eq!(geometry.stops.len(), 3);
    }

    #[test]
    fn inbound_starts_at_turn_back_point() {
        let raw = RawDirectionSet {
            code0: vec![stop("A", 1, 36.1, 127.1), stop("Z", 2, 36.9, 127.9)],
            code1: vec![stop("Z", 1, 36.8, 127.8), stop("A", 2, 36.0, 127.0)],
        };
        let path = reconcile(raw, "A", "Z");

        let geometry = build_geometry(&path).unwrap();
        assert!(!geometry.is_circular());
        assert_eq!(geometry.outbound, [coord(36.1, 127.1), coord(36.9, 127.9)]);
        assert_eq!(
            geometry.inbound,
            [coord(36.9, 127.9), coord(36.8, 127.8), coord(36.0, 127.0)]
        );
        assert_eq!(geometry.center(), coord(36.1, 127.1));
    }

    #[test]
    fn terminus_marker_is_the_named_stop_not_the_last() {
        let raw = RawDirectionSet {
            code0: vec![
                stop("A", 1, 36.1, 127.1),
                stop("Z", 2, 36.5, 127.5),
                stop("Depot", 3, 36.6, 127.6),
            ],
            code1: vec![stop("A", 1, 36.1, 127.1)],
        };
        let path = reconcile(raw, "A", "Z");

        let geometry = build_geometry(&path).unwrap();
        match geometry.endpoints {
            Endpoints::Linear { origin, terminus } => {
                assert_eq!(origin.name, "A");
                assert_eq!(terminus.name, "Z");
                assert_eq!(terminus.order, 2);
            }
            Endpoints::Loop { .. } => panic!("expected a linear route"),
        }
        // The line still runs to the last outbound stop.
        assert_eq!(geometry.inbound[0], coord(36.6, 127.6));
    }

    #[test]
    fn stop_markers_keep_per_direction_order() {
        let raw = RawDirectionSet {
            code0: vec![stop("A", 1, 36.1, 127.1), stop("Z", 2, 36.9, 127.9)],
            code1: vec![stop("Z", 1, 36.8, 127.8), stop("A", 2, 36.0, 127.0)],
        };
        let path = reconcile(raw, "A", "Z");

        let geometry = build_geometry(&path).unwrap();
        let labels: Vec<(&str, u32)> = geometry
            .stops
            .iter()
            .map(|m| (m.name.as_str(), m.order))
            .collect();
        assert_eq!(labels, [("A", 1), ("Z", 2), ("Z", 1), ("A", 2)]);
    }

    #[test]
    fn empty_path_has_no_geometry() {
        let path = reconcile(RawDirectionSet::default(), "A", "Z");
        assert!(build_geometry(&path).is_none());
    }
}
