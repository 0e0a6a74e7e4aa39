//! Bus route map generator.
//!
//! Looks up a bus route on the national TAGO open-data service, works out
//! which direction is outbound, and draws both directions on a Leaflet map.

pub mod config;
pub mod domain;
pub mod pipeline;
pub mod reconcile;
pub mod render;
pub mod select;
pub mod tago;
