//! Domain types for bus route maps.
//!
//! These types represent validated route data. Upstream records are
//! checked at the conversion boundary (`tago::convert`), so code that
//! receives these types can trust their shape.

mod route;
mod stop;

pub use route::{InvalidRouteId, RouteId, RouteRecord, RouteType};
pub use stop::{Coord, DirectionCode, RawDirectionSet, Stop};
