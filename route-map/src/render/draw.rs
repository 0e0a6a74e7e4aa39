//! Drawing a route onto a [`MapCanvas`].

use std::path::Path;

use askama::Template;
use tracing::{debug, warn};

use crate::domain::RouteRecord;
use crate::reconcile::CanonicalPath;

use super::canvas::{Icon, MapCanvas, MapMarker, MapPolyline};
use super::geometry::{Endpoints, RenderGeometry, StopMarker, build_geometry};
use super::RenderError;
use super::templates::{EndpointPopupTemplate, InfoBoxTemplate, StopPopupTemplate};

/// Initial zoom level of every map.
pub const ZOOM: u8 = 12;

/// Draw `geometry` for `route` onto `canvas`.
///
/// The inbound line goes down first so the outbound line sits on top of
/// it where they share a road. Stop markers come next, then the origin and
/// terminus markers, then the summary box.
pub fn draw_route<C: MapCanvas + ?Sized>(
    geometry: &RenderGeometry,
    route: &RouteRecord,
    city_name: &str,
    canvas: &mut C,
) -> Result<(), RenderError> {
    canvas.center(geometry.center(), ZOOM);

    if !geometry.inbound.is_empty() {
        canvas.polyline(MapPolyline {
            coords: geometry.inbound.clone(),
            label: format!("{}번 (종점→기점)", route.number),
            color: "blue",
        });
    }
    canvas.polyline(MapPolyline {
        coords: geometry.outbound.clone(),
        label: format!("{}번 (기점→종점)", route.number),
        color: "red",
    });

    for stop in &geometry.stops {
        canvas.marker(MapMarker {
            at: stop.at,
            tooltip: stop.name.clone(),
            popup_html: StopPopupTemplate {
                name: &stop.name,
                order: stop.order,
            }
            .render()?,
            icon: Icon::Stop,
        });
    }

    match &geometry.endpoints {
        Endpoints::Loop { origin } => {
            canvas.marker(endpoint_marker(origin, "기/종점", Icon::Loop)?);
        }
        Endpoints::Linear { origin, terminus } => {
            canvas.marker(endpoint_marker(origin, "기점", Icon::Origin)?);
            canvas.marker(endpoint_marker(terminus, "종점", Icon::Terminus)?);
        }
    }

    let terminus = if geometry.is_circular() {
        &route.declared_origin
    } else {
        &route.declared_terminus
    };
    let info = InfoBoxTemplate {
        title: format!("{} {} {}", city_name, route.route_type.label(), route.number),
        origin: route.declared_origin.clone(),
        terminus: terminus.clone(),
        color: route.route_type.color().to_string(),
    };
    canvas.annotate(info.render()?);

    Ok(())
}

fn endpoint_marker(stop: &StopMarker, role: &str, icon: Icon) -> Result<MapMarker, RenderError> {
    let popup_html = EndpointPopupTemplate {
        role,
        name: &stop.name,
    }
    .render()?;
    Ok(MapMarker {
        at: stop.at,
        tooltip: role.to_string(),
        popup_html,
        icon,
    })
}

/// Build, draw and save the map for one reconciled route.
///
/// Returns `Ok(None)` without touching `canvas` when the route has no
/// stops to draw.
pub fn render_route<C: MapCanvas + ?Sized>(
    path: &CanonicalPath,
    route: &RouteRecord,
    city_name: &str,
    out_path: &Path,
    canvas: &mut C,
) -> Result<Option<RenderGeometry>, RenderError> {
    let Some(geometry) = build_geometry(path) else {
        warn!(route = %route.id, "no stops to draw");
        return Ok(None);
    };

    draw_route(&geometry, route, city_name, canvas)?;
    canvas.save(out_path)?;
    debug!(route = %route.id, path = %out_path.display(), "map saved");

    Ok(Some(geometry))
}

/// File name for a route's map, e.g. `대전광역시(계룡시)_간선버스_102.html`.
///
/// Path separators are replaced so the name always stays in the output
/// directory.
pub fn output_file_name(city_name: &str, route: &RouteRecord) -> String {
    let name = format!(
        "{}_{}_{}.html",
        city_name,
        route.route_type.label().replace(' ', "_"),
        route.number
    );
    name.replace(['/', '\\'], "_")
}
