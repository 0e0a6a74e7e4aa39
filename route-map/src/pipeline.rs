//! The route map pipeline.
//!
//! One run goes lookup, choose, fetch stops, reconcile, render, each step
//! finishing before the next starts.

use std::future::Future;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{AppConfig, ConfigError, SourceConfig};
use crate::domain::{RawDirectionSet, RouteId, RouteRecord};
use crate::reconcile::{Orientation, reconcile};
use crate::render::{MapCanvas, RenderError, output_file_name, render_route};
use crate::select::{Choice, RouteChooser, choose_one};
use crate::tago::{MockTagoClient, TagoClient, TagoError};

/// Provider of route and stop data.
///
/// This abstraction allows the pipeline to run against recorded data.
pub trait TransitSource {
    /// Routes whose number is exactly `route_no`. Empty when there are none.
    fn find_routes(
        &self,
        route_no: &str,
    ) -> impl Future<Output = Result<Vec<RouteRecord>, TagoError>>;

    /// Stops of one route, split by direction flag.
    fn route_stops(
        &self,
        route_id: &RouteId,
    ) -> impl Future<Output = Result<RawDirectionSet, TagoError>>;
}

impl TransitSource for TagoClient {
    async fn find_routes(&self, route_no: &str) -> Result<Vec<RouteRecord>, TagoError> {
        TagoClient::find_routes(self, route_no).await
    }

    async fn route_stops(&self, route_id: &RouteId) -> Result<RawDirectionSet, TagoError> {
        TagoClient::route_stops(self, route_id).await
    }
}

impl TransitSource for MockTagoClient {
    async fn find_routes(&self, route_no: &str) -> Result<Vec<RouteRecord>, TagoError> {
        MockTagoClient::find_routes(self, route_no).await
    }

    async fn route_stops(&self, route_id: &RouteId) -> Result<RawDirectionSet, TagoError> {
        MockTagoClient::route_stops(self, route_id).await
    }
}

/// Either the live API or recorded data, as configured.
#[derive(Debug)]
pub enum Source {
    Live(TagoClient),
    Mock(MockTagoClient),
}

impl Source {
    /// Build the source `config` asks for.
    pub fn from_config(config: &AppConfig) -> Result<Self, TagoError> {
        match &config.source {
            SourceConfig::Mock { data_dir } => Ok(Source::Mock(MockTagoClient::new(data_dir)?)),
            SourceConfig::Live { .. } => {
                let tago_config = config
                    .tago_config()
                    .ok_or(TagoError::NotConfigured(ConfigError::MissingServiceKey))?;
                Ok(Source::Live(TagoClient::new(tago_config)?))
            }
        }
    }
}

impl TransitSource for Source {
    async fn find_routes(&self, route_no: &str) -> Result<Vec<RouteRecord>, TagoError> {
        match self {
            Source::Live(client) => client.find_routes(route_no).await,
            Source::Mock(client) => client.find_routes(route_no).await,
        }
    }

    async fn route_stops(&self, route_id: &RouteId) -> Result<RawDirectionSet, TagoError> {
        match self {
            Source::Live(client) => client.route_stops(route_id).await,
            Source::Mock(client) => client.route_stops(route_id).await,
        }
    }
}

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The map was written to `path`.
    Rendered {
        route: RouteRecord,
        path: PathBuf,
        orientation: Orientation,
    },
    /// No route has exactly this number.
    NotFound { route_no: String },
    /// Several routes matched and none was picked.
    Cancelled,
    /// The chosen route has no usable stops.
    NothingToRender { route: RouteRecord },
    /// The route number was blank.
    NoInput,
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] TagoError),

    #[error("could not render map: {0}")]
    Render(#[from] RenderError),
}

/// Produce the map for `route_no`.
///
/// `canvas_for` is only called once a route with stops has been chosen, so
/// no canvas is created for runs that draw nothing.
pub async fn run<S, C, F, M>(
    config: &AppConfig,
    source: &S,
    chooser: &mut C,
    canvas_for: F,
    route_no: &str,
) -> Result<Outcome, PipelineError>
where
    S: TransitSource,
    C: RouteChooser + ?Sized,
    F: FnOnce(&RouteRecord) -> M,
    M: MapCanvas,
{
    let route_no = route_no.trim();
    if route_no.is_empty() {
        return Ok(Outcome::NoInput);
    }

    let candidates = source.find_routes(route_no).await?;
    debug!(route_no, candidates = candidates.len(), "route lookup done");

    let route = match choose_one(candidates, chooser) {
        Choice::Chosen(route) => route,
        Choice::Cancelled => return Ok(Outcome::Cancelled),
        Choice::NoCandidates => {
            return Ok(Outcome::NotFound {
                route_no: route_no.to_string(),
            });
        }
    };
    info!(route = %route.id, summary = %route.summary(), "route selected");

    let raw = source.route_stops(&route.id).await?;
    let path = reconcile(raw, &route.declared_origin, &route.declared_terminus);
    if path.is_empty() {
        return Ok(Outcome::NothingToRender { route });
    }

    let out_path = config
        .output_dir
        .join(output_file_name(&config.city_name, &route));
    let mut canvas = canvas_for(&route);
    match render_route(&path, &route, &config.city_name, &out_path, &mut canvas)? {
        Some(_) => Ok(Outcome::Rendered {
            route,
            path: out_path,
            orientation: path.orientation(),
        }),
        None => Ok(Outcome::NothingToRender { route }),
    }
}
