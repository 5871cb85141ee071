use crate::network::TransitNetwork;

use super::RoutingSettings;
use super::graph::EdgeIdx;
use super::router::ScopedRoute;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus_name: String,
        span_count: u32,
        /// Ride time without the preceding wait.
        time: f64,
    },
}

impl RouteItem {
    pub fn time(&self) -> f64 {
        match self {
            RouteItem::Wait { time, .. } | RouteItem::Bus { time, .. } => *time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

/// The solved path disagrees with the network it was built from.
#[derive(Debug)]
pub enum ReconstructError {
    BusDoesNotServeStop {
        edge_idx: EdgeIdx,
        bus: String,
        stop: String,
    },
    WeightBelowWaitTime {
        edge_idx: EdgeIdx,
        weight: f64,
    },
}

/// Turns a solved route into a wait item and a bus item per ridden edge.
pub fn reconstruct(
    network: &TransitNetwork,
    settings: &RoutingSettings,
    route: &ScopedRoute<'_>,
) -> Result<Itinerary, ReconstructError> {
    let mut items = Vec::with_capacity(2 * route.info().edge_count);
    let mut total_time = 0.0;

    for (edge_idx, edge) in route.edges() {
        let bus = network.bus(edge.bus);
        for vertex in [edge.from, edge.to] {
            let stop = network.stop(vertex.stop());
            if !stop.is_served_by(edge.bus) {
                return Err(ReconstructError::BusDoesNotServeStop {
                    edge_idx,
                    bus: bus.name().to_string(),
                    stop: stop.name().to_string(),
                });
            }
        }
        if edge.weight < settings.wait_time {
            return Err(ReconstructError::WeightBelowWaitTime {
                edge_idx,
                weight: edge.weight,
            });
        }

        total_time += edge.weight;
        if edge.span == 0 {
            continue;
        }
        items.push(RouteItem::Wait {
            stop_name: network.stop(edge.from.stop()).name().to_string(),
            time: settings.wait_time,
        });
        items.push(RouteItem::Bus {
            bus_name: bus.name().to_string(),
            span_count: edge.span,
            time: edge.weight - settings.wait_time,
        });
    }

    Ok(Itinerary { total_time, items })
}
