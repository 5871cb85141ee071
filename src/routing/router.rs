use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use log::debug;

use crate::col::{HashMap, map_new};

use super::graph::{EdgeIdx, EdgePayload, TransitGraph, VertexIdx};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub u32);
impl Debug for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("r#{}", self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub id: RouteId,
    pub weight: f64,
    pub edge_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    vertex: VertexIdx,
    distance: f64,
}
impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for QueueItem {}
impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| self.vertex.0.cmp(&other.vertex.0))
    }
}

/// Single-source shortest path distances and the last edge of each shortest path.
struct ShortestPathTree {
    distance: Vec<f64>,
    incoming: Vec<Option<EdgeIdx>>,
}

fn dijkstra(graph: &TransitGraph, source: VertexIdx) -> ShortestPathTree {
    let mut distance = vec![f64::INFINITY; graph.num_vertices()];
    let mut incoming: Vec<Option<EdgeIdx>> = vec![None; graph.num_vertices()];
    distance[source.0 as usize] = 0.0;

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::new();
    queue.push(QueueItem {
        vertex: source,
        distance: 0.0,
    });

    while let Some(QueueItem {
        vertex,
        distance: vertex_distance,
    }) = queue.pop()
    {
        if vertex_distance > distance[vertex.0 as usize] {
            continue;
        }
        for &edge_idx in graph.outgoing(vertex) {
            let edge = graph.edge(edge_idx);
            let to_distance = vertex_distance + edge.weight;
            if to_distance < distance[edge.to.0 as usize] {
                distance[edge.to.0 as usize] = to_distance;
                incoming[edge.to.0 as usize] = Some(edge_idx);
                queue.push(QueueItem {
                    vertex: edge.to,
                    distance: to_distance,
                });
            }
        }
    }

    ShortestPathTree { distance, incoming }
}

/// Answers shortest path queries on a fixed graph.
///
/// Shortest path trees are cached per source vertex. Every built route stays
/// open until it is released, so several routes may be read at the same time.
pub struct Router {
    graph: TransitGraph,
    trees: HashMap<VertexIdx, ShortestPathTree>,
    open_routes: HashMap<RouteId, Vec<EdgeIdx>>,
    next_route_id: u32,
}

impl Router {
    pub fn new(graph: TransitGraph) -> Self {
        Self {
            graph,
            trees: map_new(),
            open_routes: map_new(),
            next_route_id: 0,
        }
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// Computes the cheapest path from `from` to `to`. Returns `None` if `to` is unreachable
    /// or either vertex is not part of the graph.
    /// The returned route has to be released with [Router::release_route].
    pub fn build_route(&mut self, from: VertexIdx, to: VertexIdx) -> Option<RouteInfo> {
        let graph = &self.graph;
        if !graph.contains(from) || !graph.contains(to) {
            debug!("No route from {:?} to {:?}: vertex is not in the graph", from, to);
            return None;
        }
        let tree = self.trees.entry(from).or_insert_with(|| {
            debug!("Computing shortest path tree from {:?}", from);
            dijkstra(graph, from)
        });

        let weight = tree.distance[to.0 as usize];
        if weight.is_infinite() {
            return None;
        }

        let mut edges = vec![];
        let mut current = to;
        while current != from {
            let Some(edge_idx) = tree.incoming[current.0 as usize] else {
                panic!("Shortest path tree from {:?} is missing an edge into {:?}", from, current);
            };
            edges.push(edge_idx);
            current = graph.edge(edge_idx).from;
        }
        edges.reverse();

        let id = RouteId(self.next_route_id);
        self.next_route_id += 1;
        let edge_count = edges.len();
        self.open_routes.insert(id, edges);
        Some(RouteInfo {
            id,
            weight,
            edge_count,
        })
    }

    /// The `index`-th edge of an open route.
    pub fn route_edge(&self, id: RouteId, index: usize) -> EdgeIdx {
        match self.open_routes.get(&id) {
            Some(edges) => edges[index],
            None => panic!("Route {:?} has been released or was never built", id),
        }
    }

    pub fn release_route(&mut self, id: RouteId) {
        if self.open_routes.remove(&id).is_none() {
            panic!("Route {:?} has been released or was never built", id);
        }
    }

    pub fn num_open_routes(&self) -> usize {
        self.open_routes.len()
    }

    /// Like [Router::build_route], but the route is released when the returned guard is dropped.
    pub fn scoped_route(&mut self, from: VertexIdx, to: VertexIdx) -> Option<ScopedRoute<'_>> {
        let info = self.build_route(from, to)?;
        Some(ScopedRoute { router: self, info })
    }
}

pub struct ScopedRoute<'a> {
    router: &'a mut Router,
    info: RouteInfo,
}

impl ScopedRoute<'_> {
    pub fn info(&self) -> RouteInfo {
        self.info
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &EdgePayload)> + '_ {
        let router = &*self.router;
        let id = self.info.id;
        (0..self.info.edge_count).map(move |index| {
            let edge_idx = router.route_edge(id, index);
            (edge_idx, router.graph.edge(edge_idx))
        })
    }
}

impl Drop for ScopedRoute<'_> {
    fn drop(&mut self) {
        self.router.release_route(self.info.id);
    }
}
