use log::info;

use crate::network::TransitNetwork;

pub mod graph;
pub mod itinerary;
pub mod router;

use graph::build_graph;
use router::Router;

/// Converts km/h to m/min.
const KMH_TO_METERS_PER_MINUTE: f64 = 16.66;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before every boarding.
    pub wait_time: f64,
    /// Bus velocity in meters per minute.
    pub velocity: f64,
}

impl RoutingSettings {
    pub fn new(wait_time_minutes: f64, velocity_kmh: f64) -> Self {
        Self {
            wait_time: wait_time_minutes,
            velocity: velocity_kmh * KMH_TO_METERS_PER_MINUTE,
        }
    }

    /// Minutes it takes to ride `meters`.
    pub fn ride_time(&self, meters: u32) -> f64 {
        meters as f64 / self.velocity
    }
}

/// The routing graph and its router are derived from the network once, on first use.
/// Later changes to the network are not reflected.
pub enum RoutingState {
    Unbuilt,
    Built(Box<Router>),
}

impl RoutingState {
    pub fn is_built(&self) -> bool {
        matches!(self, RoutingState::Built(_))
    }

    pub fn router(&mut self, network: &TransitNetwork, settings: &RoutingSettings) -> &mut Router {
        if let RoutingState::Unbuilt = self {
            info!(
                "Building routing graph for {} stops and {} buses",
                network.num_stops(),
                network.num_buses()
            );
            *self = RoutingState::Built(Box::new(Router::new(build_graph(network, settings))));
        }
        match self {
            RoutingState::Built(router) => router.as_mut(),
            RoutingState::Unbuilt => unreachable!("routing state was just built"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RoutingSettings, RoutingState};
    use crate::geo::Coordinates;
    use crate::network::TransitNetwork;

    #[test]
    fn velocity_is_converted_to_meters_per_minute() {
        let settings = RoutingSettings::new(6.0, 40.0);
        assert_eq!(settings.velocity, 40.0 * 16.66);
        assert_eq!(settings.ride_time(3900), 3900.0 / (40.0 * 16.66));
    }

    #[test]
    fn graph_is_built_once_on_first_use() {
        let mut network = TransitNetwork::new();
        network.define_stop("A", Coordinates::new(55.60, 37.20), [("B", 1000)]);
        network.define_stop("B", Coordinates::new(55.61, 37.20), Vec::<(&str, u32)>::new());
        network.define_bus("1", ["A", "B"], false);
        let settings = RoutingSettings::new(6.0, 40.0);

        let mut state = RoutingState::Unbuilt;
        assert!(!state.is_built());
        let num_edges = state.router(&network, &settings).graph().num_edges();
        assert!(state.is_built());

        network.define_bus("2", ["B", "A"], false);
        assert_eq!(state.router(&network, &settings).graph().num_edges(), num_edges);
    }
}
