//! Direction reconciliation.
//!
//! The upstream direction flag says which of two stop collections a stop
//! belongs to, but not which collection runs origin→terminus. Routes
//! disagree on that mapping, so roles are resolved from the declared
//! terminus name instead:
//!
//! 1. No `code1` stops: the route is a single loop (circular).
//! 2. The declared terminus appears in `code0`: `code0` is outbound.
//! 3. Otherwise the mapping is reversed: `code1` is outbound.
//!
//! The canonical terminus is the first outbound stop carrying the declared
//! terminus name, or the last outbound stop when no name matches.

use std::collections::HashSet;

use crate::domain::{RawDirectionSet, Stop};

/// How the raw direction flags were mapped to roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// One collection only; it is a loop.
    Circular,
    /// `code0` is outbound, `code1` inbound.
    AsFlagged,
    /// `code1` is outbound, `code0` inbound.
    Swapped,
}

/// Stops of a route arranged as outbound and inbound.
///
/// Invariants:
/// - the route is circular exactly when `inbound` is empty
/// - the first outbound stop is the origin
/// - `terminus`, when set, indexes into `outbound`
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalPath {
    outbound: Vec<Stop>,
    inbound: Vec<Stop>,
    terminus: Option<usize>,
    orientation: Orientation,
    terminus_fallback: bool,
}

impl CanonicalPath {
    /// Stops from origin towards the terminus.
    pub fn outbound(&self) -> &[Stop] {
        &self.outbound
    }

    /// Stops from the terminus back to the origin. Empty for loops.
    pub fn inbound(&self) -> &[Stop] {
        &self.inbound
    }

    pub fn is_circular(&self) -> bool {
        self.inbound.is_empty()
    }

    /// Whether there is anything to draw.
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }

    /// The first outbound stop.
    pub fn origin(&self) -> Option<&Stop> {
        self.outbound.first()
    }

    /// The canonical terminus. For loops this is the origin.
    pub fn terminus(&self) -> Option<&Stop> {
        self.terminus.and_then(|i| self.outbound.get(i))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True when no outbound stop carried the declared terminus name and
    /// the last outbound stop stands in for it.
    pub fn terminus_fallback(&self) -> bool {
        self.terminus_fallback
    }
}

/// Arrange raw direction collections into a [`CanonicalPath`].
///
/// `declared_origin` is only used for diagnostics; `declared_terminus`
/// decides the roles.
pub fn reconcile(
    raw: RawDirectionSet,
    declared_origin: &str,
    declared_terminus: &str,
) -> CanonicalPath {
    let RawDirectionSet { code0, code1 } = raw;

    if code1.is_empty() {
        let terminus = (!code0.is_empty()).then_some(0);
        return CanonicalPath {
            outbound: code0,
            inbound: Vec::new(),
            terminus,
            orientation: Orientation::Circular,
            terminus_fallback: false,
        };
    }

    let in_code0 = contains_name(&code0, declared_terminus);
    let (outbound, inbound, orientation) = if in_code0 {
        (code0, code1, Orientation::AsFlagged)
    } else {
        if !contains_name(&code1, declared_terminus) {
            tracing::warn!(
                declared_terminus,
                "terminus name found in neither direction; direction roles are a guess"
            );
        }
        tracing::info!("direction flags reversed for this route; correcting by terminus name");
        (code1, code0, Orientation::Swapped)
    };

    if let Some(first) = outbound.first()
        && first.name != declared_origin
    {
        tracing::debug!(
            declared_origin,
            first_stop = %first.name,
            "first outbound stop differs from declared origin"
        );
    }

    let (terminus, terminus_fallback) = locate_terminus(&outbound, declared_terminus);

    CanonicalPath {
        outbound,
        inbound,
        terminus,
        orientation,
        terminus_fallback,
    }
}

fn contains_name(stops: &[Stop], name: &str) -> bool {
    let names: HashSet<&str> = stops.iter().map(|s| s.name.as_str()).collect();
    names.contains(name)
}

/// Index of the first stop named `name`, else the last stop.
fn locate_terminus(outbound: &[Stop], name: &str) -> (Option<usize>, bool) {
    if let Some(i) = outbound.iter().position(|s| s.name == name) {
        return (Some(i), false);
    }
    if outbound.is_empty() {
        return (None, false);
    }
    tracing::warn!(
        declared_terminus = name,
        fallback = %outbound[outbound.len() - 1].name,
        "declared terminus not on outbound path; using its last stop"
    );
    (Some(outbound.len() - 1), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coord;

    fn stop(name: &str, order: u32, lat: f64) -> Stop {
        Stop::new(name, order, Coord::new(lat, 127.0).unwrap())
    }

    fn names(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|s| s.name.as_str()).collect()
    }

    fn abz() -> Vec<Stop> {
        vec![stop("A", 1, 36.1), stop("B", 2, 36.2), stop("Z", 3, 36.3)]
    }

    fn zba() -> Vec<Stop> {
        vec![stop("Z", 1, 36.31), stop("B", 2, 36.21), stop("A", 3, 36.11)]
    }

    #[test]
    fn single_collection_is_circular() {
        let raw = RawDirectionSet {
            code0: vec![stop("A", 1, 36.1), stop("B", 2, 36.2), stop("C", 3, 36.3)],
            code1: vec![],
        };

        let path = reconcile(raw, "A", "C");
        assert!(path.is_circular());
        assert_eq!(path.orientation(), Orientation::Circular);
        assert_eq!(names(path.outbound()), ["A", "B", "C"]);
        assert!(path.inbound().is_empty());
        assert_eq!(path.origin().unwrap().name, "A");
        assert_eq!(path.terminus().unwrap().name, "A");
    }

    #[test]
    fn terminus_in_code0_keeps_flags() {
        let raw = RawDirectionSet {
            code0: abz(),
            code1: zba(),
        };

        let path = reconcile(raw, "A", "Z");
        assert!(!path.is_circular());
        assert_eq!(path.orientation(), Orientation::AsFlagged);
        assert_eq!(path.outbound(), abz().as_slice());
        assert_eq!(path.inbound(), zba().as_slice());

        let terminus = path.terminus().unwrap();
        assert_eq!(terminus.name, "Z");
        assert_eq!(terminus.order, 3);
        assert!(!path.terminus_fallback());
    }

    #[test]
    fn swapped_contents_follow_the_collection_holding_the_terminus() {
        // Both collections name "Z", so code0 wins whichever list it holds.
        let raw = RawDirectionSet {
            code0: zba(),
            code1: abz(),
        };

        let path = reconcile(raw, "A", "Z");
        assert_eq!(path.orientation(), Orientation::AsFlagged);
        assert_eq!(path.outbound(), zba().as_slice());
        assert_eq!(path.inbound(), abz().as_slice());
        assert_eq!(path.terminus().unwrap().order, 1);
    }

    #[test]
    fn terminus_only_in_code1_swaps() {
        let raw = RawDirectionSet {
            code0: vec![stop("Y", 1, 36.3), stop("B", 2, 36.2), stop("A", 3, 36.1)],
            code1: abz(),
        };

        let path = reconcile(raw, "A", "Z");
        assert_eq!(path.orientation(), Orientation::Swapped);
        assert_eq!(path.outbound(), abz().as_slice());
        assert_eq!(names(path.inbound()), ["Y", "B", "A"]);
        assert_eq!(path.terminus().unwrap().name, "Z");
    }

    #[test]
    fn terminus_nowhere_swaps_and_falls_back_to_last() {
        let raw = RawDirectionSet {
            code0: vec![stop("A", 1, 36.1), stop("B", 2, 36.2)],
            code1: vec![stop("C", 1, 36.3), stop("D", 2, 36.4)],
        };

        let path = reconcile(raw, "A", "Q");
        assert_eq!(path.orientation(), Orientation::Swapped);
        assert_eq!(names(path.outbound()), ["C", "D"]);
        assert_eq!(path.terminus().unwrap().name, "D");
        assert!(path.terminus_fallback());
    }

    #[test]
    fn duplicate_terminus_name_uses_first_by_order() {
        let raw = RawDirectionSet {
            code0: vec![
                stop("A", 1, 36.1),
                stop("Z", 2, 36.2),
                stop("B", 3, 36.3),
                stop("Z", 4, 36.4),
            ],
            code1: vec![stop("A", 1, 36.1)],
        };

        let path = reconcile(raw, "A", "Z");
        assert_eq!(path.terminus().unwrap().order, 2);
    }

    #[test]
    fn both_empty_is_circular_and_empty() {
        let path = reconcile(RawDirectionSet::default(), "A", "Z");
        assert!(path.is_circular());
        assert!(path.is_empty());
        assert!(path.origin().is_none());
        assert!(path.terminus().is_none());
    }

    #[test]
    fn empty_code0_with_code1_becomes_circular() {
        let raw = RawDirectionSet {
            code0: vec![],
            code1: abz(),
        };

        let path = reconcile(raw, "A", "Z");
        assert_eq!(path.orientation(), Orientation::Swapped);
        assert!(path.is_circular());
        assert_eq!(path.outbound(), abz().as_slice());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let raw = RawDirectionSet {
            code0: zba(),
            code1: abz(),
        };
        assert_eq!(reconcile(raw.clone(), "A", "Q"), reconcile(raw, "A", "Q"));
    }
}
