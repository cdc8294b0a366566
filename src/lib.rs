//! `pagerank-engine`: PageRank and personalized PageRank by power iteration.
//!
//! Input is a fully materialized adjacency list; output is one score per node.
//! Each call is a single synchronous computation with no state kept between calls.
//!
//! Public invariants (must not drift):
//! - **Node order**: `scores[i]` is the score of node `i` of the input adjacency list.
//! - **Normalization**: returned scores are non-negative and sum to 1.0 (up to rounding).
//! - **Dangling nodes**: a node without out-edges spreads its mass uniformly over all nodes.
//! - **Personalization side effect**: a personalization vector whose weights sum to more
//!   than 1.0 is rescaled in place during validation; see [`Personalization`].
//! - **Pass count**: with `max_iterations = K` the solver performs at most `K - 1` update
//!   passes. Expected scores published for this engine depend on that count.
//!
//! ```
//! use pagerank_engine::{pagerank, PageRankConfig};
//!
//! let graph = vec![vec![1], vec![2], vec![0]];
//! let config = PageRankConfig::default().with_max_iterations(200).with_threshold(0.01);
//! let scores = pagerank(&graph, config).unwrap();
//! assert!(scores.iter().all(|s| (s - 1.0 / 3.0).abs() < 1e-9));
//! ```

pub mod graph;
pub mod pagerank;
pub mod ppr;
pub mod validate;

pub use graph::{AdjacencyList, GraphRef};
pub use pagerank::{pagerank, pagerank_run, pagerank_with_callback, PageRankConfig, PageRankRun};
pub use ppr::{personalized_pagerank, personalized_pagerank_run, Personalization};
pub use validate::{iteration_cap, validate_input};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("the maximum number of iterations must be a positive integer, got {0}")]
    InvalidIterationCount(String),
    #[error("the error threshold must be between 0 and 1 (exclusive), got {0}")]
    InvalidThreshold(f64),
    #[error("the damping factor must be between 0 and 1 (inclusive), got {0}")]
    InvalidDamping(f64),
    #[error("node {node} links to {target}; the adjacency list can only hold node indices in [0, {node_count})")]
    GraphIndexOutOfBounds {
        node: usize,
        target: usize,
        node_count: usize,
    },
    #[error("the personalized node must be an index in [0, {node_count}), not {node}")]
    PersonalizationIndexOutOfBounds { node: usize, node_count: usize },
    #[error("personalization weight for node {node} must be finite and non-negative, got {weight}")]
    InvalidPersonalizationWeight { node: usize, weight: f64 },
    #[error("personalization weights must sum to more than 0")]
    ZeroPersonalizationSum,
}

pub type Result<T> = std::result::Result<T, Error>;
