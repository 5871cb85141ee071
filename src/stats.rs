use itertools::Itertools;

use crate::network::{BusIdx, StopIdx, TransitNetwork};

#[derive(Debug, Clone, PartialEq)]
pub struct BusStats {
    /// Number of stops visited on a full trip (there and back for linear buses).
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length of a full trip in meters.
    pub route_length: u64,
    /// Road length divided by the great-circle length of the same trip.
    pub curvature: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopStats {
    /// Names of the buses serving the stop, sorted.
    pub buses: Vec<String>,
}

pub fn bus_stats(network: &TransitNetwork, bus_idx: BusIdx) -> BusStats {
    let bus = network.bus(bus_idx);
    let route = bus.route();

    let unique_stop_count = bus.stops().iter().unique().count();
    let stop_count = if bus.is_circular() {
        route.len()
    } else {
        (2 * route.len()).saturating_sub(1)
    };

    let forward: u64 = route
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| network.road_distance(from, to) as u64)
        .sum();
    let route_length = if bus.is_circular() {
        forward
    } else {
        forward + backward_length(network, &route)
    };

    let geo_forward: f64 = route
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| network.geo_distance(from, to))
        .sum();
    let geo_length = if bus.is_circular() {
        geo_forward
    } else {
        2.0 * geo_forward
    };

    BusStats {
        stop_count,
        unique_stop_count,
        route_length,
        curvature: route_length as f64 / geo_length,
    }
}

fn backward_length(network: &TransitNetwork, route: &[StopIdx]) -> u64 {
    route
        .iter()
        .rev()
        .tuple_windows()
        .map(|(&from, &to)| network.road_distance(from, to) as u64)
        .sum()
}

pub fn stop_stats(network: &TransitNetwork, stop_idx: StopIdx) -> StopStats {
    let buses = network
        .stop(stop_idx)
        .buses()
        .map(|bus| network.bus(bus).name().to_string())
        .sorted()
        .collect_vec();
    StopStats { buses }
}
