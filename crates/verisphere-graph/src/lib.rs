//! Verisphere Link Graph
//!
//! Maintains the directed acyclic graph of claim-to-claim links. The graph
//! is write-once and grow-only: edges are appended in insertion order and
//! never removed. Every insertion is guarded by a bounded cycle search so
//! the acyclicity invariant the score engine depends on can never be
//! violated by a successful call.
//!
//! # Examples
//!
//! ```
//! use verisphere_domain::PostId;
//! use verisphere_graph::LinkGraph;
//!
//! let mut graph = LinkGraph::default();
//! let a = PostId::from_value(1);
//! let b = PostId::from_value(2);
//! let link = PostId::from_value(10);
//!
//! graph.add_edge(a, b, link, false).unwrap();
//! assert_eq!(graph.outgoing(a).len(), 1);
//! // The reverse edge would close a cycle and is rejected.
//! assert!(graph.add_edge(b, a, PostId::from_value(11), false).is_err());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod graph;

pub use config::GraphConfig;
pub use error::GraphError;
pub use graph::{IncomingEdge, LinkGraph, OutgoingEdge};
