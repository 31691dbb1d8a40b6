//! Multi-target shortest paths.
//!
//! All strategies run the same Dijkstra (same heap order, same strict
//! relaxation), so they agree on both the chosen target and the path to it.
//! Among targets of equal minimal weight the one listed first wins.

use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

use doorway_config::RouteStrategy;

use crate::error::RouteError;
use crate::graph::{NodeId, WalkGraph};

/// A shortest path from the origin to the chosen target.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Node ids from origin to target, both included.
    pub nodes: Vec<NodeId>,
    /// Sum of edge lengths along `nodes`.
    pub weight: f64,
}

impl Route {
    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Route),
    /// None of the targets is reachable from the origin.
    NoPath,
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoPath => None,
        }
    }
}

/// Shortest route from `origin` to whichever of `targets` is cheapest.
pub fn route(
    graph: &WalkGraph,
    origin: NodeId,
    targets: &[NodeId],
    strategy: RouteStrategy,
) -> Result<RouteOutcome, RouteError> {
    if targets.is_empty() {
        return Err(RouteError::NoTargets);
    }
    let origin_idx = graph
        .index_of(origin)
        .ok_or(RouteError::UnknownOrigin { id: origin })?;
    let target_idx = targets
        .iter()
        .map(|&id| graph.index_of(id).ok_or(RouteError::UnknownTarget { id }))
        .collect::<Result<Vec<_>, _>>()?;

    let best = match strategy {
        RouteStrategy::PerTarget => target_idx
            .iter()
            .map(|&t| single_target(graph, origin_idx, t))
            .fold(None, keep_first_minimum),
        RouteStrategy::SingleSearch => {
            let tree = ShortestPathTree::grow(graph, origin_idx, &target_idx);
            target_idx
                .iter()
                .map(|&t| tree.path_to(graph, t))
                .fold(None, keep_first_minimum)
        }
        RouteStrategy::Parallel => target_idx
            .par_iter()
            .enumerate()
            .filter_map(|(pos, &t)| single_target(graph, origin_idx, t).map(|r| (pos, r)))
            .min_by(|(pa, a), (pb, b)| a.weight.total_cmp(&b.weight).then(pa.cmp(pb)))
            .map(|(_, r)| r),
    };

    debug!(
        origin,
        targets = targets.len(),
        ?strategy,
        found = best.is_some(),
        "route search finished"
    );
    Ok(match best {
        Some(route) => RouteOutcome::Found(route),
        None => RouteOutcome::NoPath,
    })
}

fn keep_first_minimum(best: Option<Route>, candidate: Option<Route>) -> Option<Route> {
    match (best, candidate) {
        (Some(b), Some(c)) if c.weight < b.weight => Some(c),
        (Some(b), _) => Some(b),
        (None, c) => c,
    }
}

fn single_target(graph: &WalkGraph, origin: NodeIndex, target: NodeIndex) -> Option<Route> {
    ShortestPathTree::grow(graph, origin, &[target]).path_to(graph, target)
}

/// Heap entry; `BinaryHeap` is a max-heap so the ordering is reversed.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct ShortestPathTree {
    dist: Vec<f64>,
    prev: Vec<Option<NodeIndex>>,
    settled: Vec<bool>,
}

impl ShortestPathTree {
    /// Dijkstra from `origin`, stopping once every node in `targets` is
    /// settled or nothing reachable is left.
    fn grow(graph: &WalkGraph, origin: NodeIndex, targets: &[NodeIndex]) -> Self {
        let bound = graph.index_bound();
        let mut tree = Self {
            dist: vec![f64::INFINITY; bound],
            prev: vec![None; bound],
            settled: vec![false; bound],
        };
        let mut pending: Vec<NodeIndex> = targets.to_vec();
        pending.sort_unstable();
        pending.dedup();

        let mut heap = BinaryHeap::new();
        tree.dist[origin.index()] = 0.0;
        heap.push(State { cost: 0.0, node: origin });
        let mut pops = 0usize;

        while let Some(State { cost, node }) = heap.pop() {
            if tree.settled[node.index()] {
                continue;
            }
            tree.settled[node.index()] = true;
            pops += 1;

            if let Ok(pos) = pending.binary_search(&node) {
                pending.remove(pos);
                if pending.is_empty() {
                    break;
                }
            }

            for (next, length) in graph.arcs_from(node) {
                let candidate = cost + length;
                if candidate < tree.dist[next.index()] {
                    tree.dist[next.index()] = candidate;
                    tree.prev[next.index()] = Some(node);
                    heap.push(State { cost: candidate, node: next });
                }
            }
        }

        debug!(settled = pops, unsettled_targets = pending.len(), "dijkstra");
        tree
    }

    fn path_to(&self, graph: &WalkGraph, target: NodeIndex) -> Option<Route> {
        if !self.settled[target.index()] {
            return None;
        }
        let mut nodes = Vec::new();
        let mut cursor = Some(target);
        while let Some(idx) = cursor {
            nodes.push(graph.id_at(idx)?);
            cursor = self.prev[idx.index()];
        }
        nodes.reverse();
        Some(Route {
            nodes,
            weight: self.dist[target.index()],
        })
    }
}
