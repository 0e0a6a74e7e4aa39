//! Stops and per-direction stop sequences.

use std::fmt;

use serde::Serialize;

/// A WGS84 position.
///
/// Serialises as a `[lat, lon]` pair, which is what Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Create a coordinate, rejecting non-finite components.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }
}

impl Serialize for Coord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lon].serialize(serializer)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A stop on one direction of a route.
///
/// `order` is the 1-based position within its own direction only; the same
/// order value appears once per direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub order: u32,
    pub coord: Coord,
}

impl Stop {
    pub fn new(name: impl Into<String>, order: u32, coord: Coord) -> Self {
        Self {
            name: name.into(),
            order,
            coord,
        }
    }
}

/// Upstream direction flag (`updowncd`).
///
/// The flag alone does not say which direction is outbound; see
/// [`crate::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionCode {
    Code0,
    Code1,
}

impl DirectionCode {
    /// Parse the raw flag. Anything but `0` or `1` is unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" => Some(DirectionCode::Code0),
            "1" => Some(DirectionCode::Code1),
            _ => None,
        }
    }
}

/// Stops of one route split by direction flag, each side sorted strictly
/// ascending by order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDirectionSet {
    pub code0: Vec<Stop>,
    pub code1: Vec<Stop>,
}

impl RawDirectionSet {
    /// Build a set from unsorted collections.
    ///
    /// Each side is sorted by order. Where two stops share an order, the
    /// first one given is kept.
    pub fn from_unsorted(code0: Vec<Stop>, code1: Vec<Stop>) -> Self {
        Self {
            code0: sort_by_order(code0),
            code1: sort_by_order(code1),
        }
    }

    /// Total number of stops across both directions.
    pub fn len(&self) -> usize {
        self.code0.len() + self.code1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code0.is_empty() && self.code1.is_empty()
    }
}

fn sort_by_order(mut stops: Vec<Stop>) -> Vec<Stop> {
    // Stable sort keeps first-seen duplicates ahead of later ones.
    stops.sort_by_key(|s| s.order);
    let before = stops.len();
    stops.dedup_by_key(|s| s.order);
    if stops.len() != before {
        tracing::warn!(
            dropped = before - stops.len(),
            "dropped stops with duplicate order"
        );
    }
    stops
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn stops() -> impl Strategy<Value = Vec<Stop>> {
        proptest::collection::vec((1u32..50, "[A-Z]{1,3}"), 0..30).prop_map(|items| {
            items
                .into_iter()
                .map(|(order, name)| Stop::new(name, order, Coord::new(36.0, 127.0).unwrap()))
                .collect()
        })
    }

    proptest! {
        /// Both sides come out strictly ascending by order.
        #[test]
        fn strictly_ascending(code0 in stops(), code1 in stops()) {
            let set = RawDirectionSet::from_unsorted(code0, code1);
            prop_assert!(set.code0.windows(2).all(|w| w[0].order < w[1].order));
            prop_assert!(set.code1.windows(2).all(|w| w[0].order < w[1].order));
        }
    }
}
