use std::fmt::Debug;
use std::time::Instant;

use log::{debug, info};

use crate::network::{BusIdx, StopIdx, TransitNetwork};

use super::RoutingSettings;

/// One vertex per stop; the enumeration is the dense stop index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub u32);
impl Debug for VertexIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("v#{}", self.0))
    }
}

impl VertexIdx {
    pub fn of_stop(stop: StopIdx) -> Self {
        VertexIdx(stop.0)
    }

    pub fn stop(self) -> StopIdx {
        StopIdx(self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIdx(pub u32);
impl Debug for EdgeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("e#{}", self.0))
    }
}

/// Board `bus` at `from`, ride `span` stops, get off at `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePayload {
    pub from: VertexIdx,
    pub to: VertexIdx,
    /// Wait time plus ride time, in minutes.
    pub weight: f64,
    pub bus: BusIdx,
    pub span: u32,
}

#[derive(Debug)]
pub struct TransitGraph {
    edges: Vec<EdgePayload>,
    outgoing: Vec<Vec<EdgeIdx>>,
}

impl TransitGraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            edges: vec![],
            outgoing: vec![Vec::new(); num_vertices],
        }
    }

    pub fn add_edge(&mut self, edge: EdgePayload) -> EdgeIdx {
        let idx = EdgeIdx(self.edges.len() as u32);
        self.outgoing[edge.from.0 as usize].push(idx);
        self.edges.push(edge);
        idx
    }

    pub fn edge(&self, idx: EdgeIdx) -> &EdgePayload {
        &self.edges[idx.0 as usize]
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &EdgePayload)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, edge)| (EdgeIdx(idx as u32), edge))
    }

    pub fn outgoing(&self, vertex: VertexIdx) -> &[EdgeIdx] {
        &self.outgoing[vertex.0 as usize]
    }

    pub fn num_vertices(&self) -> usize {
        self.outgoing.len()
    }

    pub fn contains(&self, vertex: VertexIdx) -> bool {
        (vertex.0 as usize) < self.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Expands every bus into "board here, ride to there" edges.
pub fn build_graph(network: &TransitNetwork, settings: &RoutingSettings) -> TransitGraph {
    let start = Instant::now();
    let mut graph = TransitGraph::new(network.num_stops());

    for (bus_idx, bus) in network.buses() {
        let edges_before = graph.num_edges();
        let route = bus.route();
        let first_edge = add_forward_edges(&mut graph, network, settings, bus_idx, &route);
        if bus.is_circular() {
            add_wrap_edges(&mut graph, settings, bus_idx, &route, first_edge);
        } else {
            let reversed: Vec<StopIdx> = route.iter().rev().copied().collect();
            add_forward_edges(&mut graph, network, settings, bus_idx, &reversed);
        }
        debug!(
            "Bus {} ({} stops) expanded to {} edges",
            bus.name(),
            route.len(),
            graph.num_edges() - edges_before
        );
    }

    info!(
        "Built routing graph with {} vertices and {} edges in {:?}",
        graph.num_vertices(),
        graph.num_edges(),
        start.elapsed()
    );
    graph
}

/// Adds an edge for every pair `i <= j` of `stops`, row by row. Returns the id of the
/// first edge of the batch, see [forward_edge_offset].
fn add_forward_edges(
    graph: &mut TransitGraph,
    network: &TransitNetwork,
    settings: &RoutingSettings,
    bus: BusIdx,
    stops: &[StopIdx],
) -> EdgeIdx {
    let first_edge = EdgeIdx(graph.num_edges() as u32);
    for i in 0..stops.len() {
        let mut weight = settings.wait_time;
        for j in i..stops.len() {
            if j > i {
                weight += settings.ride_time(network.road_distance(stops[j - 1], stops[j]));
            }
            graph.add_edge(EdgePayload {
                from: VertexIdx::of_stop(stops[i]),
                to: VertexIdx::of_stop(stops[j]),
                weight,
                bus,
                span: (j - i) as u32,
            });
        }
    }
    first_edge
}

/// Position of the forward edge `(i, j)` inside its batch for a route of `len` stops.
fn forward_edge_offset(len: usize, i: usize, j: usize) -> usize {
    debug_assert!(i <= j && j < len);
    // Row k holds len - k edges.
    i * len - i * i.saturating_sub(1) / 2 + (j - i)
}

/// Adds the edges `s_i -> s_j` with `0 < j < i < n` that ride across the start of a
/// closed loop `s_0 ... s_n` (`s_n == s_0`).
fn add_wrap_edges(
    graph: &mut TransitGraph,
    settings: &RoutingSettings,
    bus: BusIdx,
    route: &[StopIdx],
    first_edge: EdgeIdx,
) {
    if route.len() < 3 {
        return;
    }
    let len = route.len();
    let n = len - 1;
    let forward_edge = |i: usize, j: usize| -> EdgeIdx {
        EdgeIdx(first_edge.0 + forward_edge_offset(len, i, j) as u32)
    };

    for i in (1..n).rev() {
        let to_end = graph.edge(forward_edge(i, n)).weight;
        for j in 1..i {
            let from_start = graph.edge(forward_edge(0, j)).weight;
            graph.add_edge(EdgePayload {
                from: VertexIdx::of_stop(route[i]),
                to: VertexIdx::of_stop(route[j]),
                // Only wait once at the loop's start.
                weight: to_end + from_start - settings.wait_time,
                bus,
                span: (n - i + j) as u32,
            });
        }
    }
}
