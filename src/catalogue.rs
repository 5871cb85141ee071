use log::{debug, warn};

use crate::geo::Coordinates;
use crate::network::TransitNetwork;
use crate::routing::graph::VertexIdx;
use crate::routing::itinerary::{Itinerary, ReconstructError, reconstruct};
use crate::routing::router::Router;
use crate::routing::{RoutingSettings, RoutingState};
use crate::stats::{BusStats, StopStats, bus_stats, stop_stats};

pub type RequestId = i64;

#[derive(Debug, Clone)]
pub enum Update {
    Stop {
        name: String,
        coordinates: Coordinates,
        road_distances: Vec<(String, u32)>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_circular: bool,
    },
}

#[derive(Debug, Clone)]
pub enum Query {
    Bus { id: RequestId, name: String },
    Stop { id: RequestId, name: String },
    Route { id: RequestId, from: String, to: String },
}

impl Query {
    pub fn id(&self) -> RequestId {
        match self {
            Query::Bus { id, .. } | Query::Stop { id, .. } | Query::Route { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Bus {
        request_id: RequestId,
        stats: BusStats,
    },
    Stop {
        request_id: RequestId,
        stats: StopStats,
    },
    Route {
        request_id: RequestId,
        itinerary: Itinerary,
    },
    NotFound {
        request_id: RequestId,
    },
}

/// Applies update records to a network and answers queries on it.
pub struct Catalogue {
    network: TransitNetwork,
    settings: RoutingSettings,
    routing: RoutingState,
}

impl Catalogue {
    pub fn new(settings: RoutingSettings) -> Self {
        Self {
            network: TransitNetwork::new(),
            settings,
            routing: RoutingState::Unbuilt,
        }
    }

    pub fn network(&self) -> &TransitNetwork {
        &self.network
    }

    pub fn apply(&mut self, update: Update) {
        if self.routing.is_built() {
            warn!("Applying an update after the routing graph was built; routes will not reflect it");
        }
        match update {
            Update::Stop {
                name,
                coordinates,
                road_distances,
            } => {
                self.network.define_stop(&name, coordinates, road_distances);
            }
            Update::Bus {
                name,
                stops,
                is_circular,
            } => {
                self.network.define_bus(&name, stops, is_circular);
            }
        }
    }

    /// Builds the routing graph if that has not happened yet.
    pub fn router(&mut self) -> &mut Router {
        self.routing.router(&self.network, &self.settings)
    }

    pub fn answer(&mut self, query: &Query) -> Result<Response, ReconstructError> {
        let request_id = query.id();
        let response = match query {
            Query::Bus { name, .. } => match self.network.lookup_bus(name) {
                Some(bus) => Response::Bus {
                    request_id,
                    stats: bus_stats(&self.network, bus),
                },
                None => Response::NotFound { request_id },
            },
            Query::Stop { name, .. } => match self.network.lookup_stop(name) {
                Some(stop) => Response::Stop {
                    request_id,
                    stats: stop_stats(&self.network, stop),
                },
                None => Response::NotFound { request_id },
            },
            Query::Route { from, to, .. } => match self.route(from, to)? {
                Some(itinerary) => Response::Route {
                    request_id,
                    itinerary,
                },
                None => Response::NotFound { request_id },
            },
        };
        Ok(response)
    }

    /// `None` if either stop is unknown or `to` cannot be reached from `from`.
    pub fn route(&mut self, from: &str, to: &str) -> Result<Option<Itinerary>, ReconstructError> {
        let (Some(from_stop), Some(to_stop)) =
            (self.network.lookup_stop(from), self.network.lookup_stop(to))
        else {
            return Ok(None);
        };
        debug!("Routing from {} to {}", from, to);

        let router = self.routing.router(&self.network, &self.settings);
        let Some(route) =
            router.scoped_route(VertexIdx::of_stop(from_stop), VertexIdx::of_stop(to_stop))
        else {
            return Ok(None);
        };
        reconstruct(&self.network, &self.settings, &route).map(Some)
    }
}
