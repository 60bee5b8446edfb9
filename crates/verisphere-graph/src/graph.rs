//! DAG index over claim identifiers

use crate::{GraphConfig, GraphError};
use std::collections::HashMap;
use verisphere_domain::PostId;

/// Edge record stored at the independent claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingEdge {
    /// The dependent claim this edge points at
    pub to: PostId,

    /// The link post that created this edge
    pub link: PostId,

    /// Whether the link undermines (rather than supports) the dependent
    pub challenge: bool,
}

/// Edge record stored at the dependent claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingEdge {
    /// The independent claim this edge comes from
    pub from: PostId,

    /// The link post that created this edge
    pub link: PostId,

    /// Whether the link undermines (rather than supports) the dependent
    pub challenge: bool,
}

#[derive(Debug, Default)]
struct Node {
    outgoing: Vec<OutgoingEdge>,
    incoming: Vec<IncomingEdge>,
    // Generation stamp of the last cycle search that visited this node.
    // Stamping instead of a per-call visited set keeps repeated insertions
    // from paying a reset cost proportional to total graph size.
    seen_gen: u64,
}

/// The claim-to-claim link graph
///
/// Adjacency lists are append-only and kept in insertion order. Acyclicity
/// is enforced at insertion time; readers may assume no claim is reachable
/// from itself.
#[derive(Debug, Default)]
pub struct LinkGraph {
    nodes: HashMap<PostId, Node>,
    generation: u64,
    config: GraphConfig,
}

impl LinkGraph {
    /// Create a graph with the given configuration
    pub fn new(config: GraphConfig) -> Self {
        Self {
            nodes: HashMap::new(),
            generation: 0,
            config,
        }
    }

    /// Insert the edge `from -> to` recorded by link post `link`
    ///
    /// Fails with [`GraphError::CycleDetected`] if `from` is reachable from
    /// `to`, i.e. if the edge would close a cycle, and with
    /// [`GraphError::TraversalLimitExceeded`] if the reachability search
    /// exceeds its visitation budget. On any failure nothing is inserted.
    pub fn add_edge(
        &mut self,
        from: PostId,
        to: PostId,
        link: PostId,
        challenge: bool,
    ) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfReference(from));
        }

        if self.reaches(to, from)? {
            return Err(GraphError::CycleDetected { from, to });
        }

        self.nodes
            .entry(from)
            .or_default()
            .outgoing
            .push(OutgoingEdge { to, link, challenge });
        self.nodes
            .entry(to)
            .or_default()
            .incoming
            .push(IncomingEdge { from, link, challenge });
        Ok(())
    }

    /// The stored outgoing edges of `claim`, in insertion order
    pub fn outgoing(&self, claim: PostId) -> &[OutgoingEdge] {
        self.nodes
            .get(&claim)
            .map(|n| n.outgoing.as_slice())
            .unwrap_or(&[])
    }

    /// The stored incoming edges of `claim`, in insertion order
    pub fn incoming(&self, claim: PostId) -> &[IncomingEdge] {
        self.nodes
            .get(&claim)
            .map(|n| n.incoming.as_slice())
            .unwrap_or(&[])
    }

    /// Number of claims with at least one edge
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounded iterative depth-first search for `target` starting at `start`
    fn reaches(&mut self, start: PostId, target: PostId) -> Result<bool, GraphError> {
        self.generation += 1;
        let gen = self.generation;

        let mut stack = vec![start];
        let mut visited = 0usize;

        while let Some(current) = stack.pop() {
            if current == target {
                return Ok(true);
            }

            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            if node.seen_gen == gen {
                continue;
            }
            node.seen_gen = gen;

            visited += 1;
            if visited > self.config.max_visited {
                return Err(GraphError::TraversalLimitExceeded {
                    limit: self.config.max_visited,
                });
            }

            for edge in &node.outgoing {
                stack.push(edge.to);
            }
        }

        Ok(false)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Exhaustive reachability over the final graph, independent of the
    // insertion-time search.
    fn reachable_from(graph: &LinkGraph, start: PostId) -> Vec<PostId> {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for edge in graph.outgoing(current) {
                if seen.insert(edge.to) {
                    stack.push(edge.to);
                }
            }
        }
        seen.into_iter().collect()
    }

    proptest! {
        /// Property: after any sequence of attempted insertions, no claim
        /// is reachable from itself
        #[test]
        fn test_acyclicity_invariant(
            edges in proptest::collection::vec((0u64..12, 0u64..12), 1..60)
        ) {
            let mut graph = LinkGraph::default();
            for (i, (from, to)) in edges.iter().enumerate() {
                // Failures are fine; successes must preserve acyclicity.
                let _ = graph.add_edge(
                    PostId::from_value(*from),
                    PostId::from_value(*to),
                    PostId::from_value(1000 + i as u64),
                    i % 2 == 0,
                );
            }

            for n in 0u64..12 {
                let start = PostId::from_value(n);
                prop_assert!(
                    !reachable_from(&graph, start).contains(&start),
                    "claim {} reachable from itself", n
                );
            }
        }

        /// Property: outgoing and incoming records stay paired
        #[test]
        fn test_edge_records_paired(
            edges in proptest::collection::vec((0u64..10, 0u64..10), 1..40)
        ) {
            let mut graph = LinkGraph::default();
            for (i, (from, to)) in edges.iter().enumerate() {
                let _ = graph.add_edge(
                    PostId::from_value(*from),
                    PostId::from_value(*to),
                    PostId::from_value(1000 + i as u64),
                    false,
                );
            }

            let total_out: usize = (0..10).map(|n| graph.outgoing(PostId::from_value(n)).len()).sum();
            let total_in: usize = (0..10).map(|n| graph.incoming(PostId::from_value(n)).len()).sum();
            prop_assert_eq!(total_out, total_in);
        }
    }
}
