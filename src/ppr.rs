//! Personalized PageRank.
//!
//! Teleportation goes to the nodes listed in a sparse [`Personalization`] vector instead of
//! uniformly to every node.

use std::collections::BTreeMap;

use crate::graph::GraphRef;
use crate::pagerank::{solve, PageRankConfig, PageRankRun};
use crate::validate::validate_input;
use crate::Result;

/// Sparse teleport weights keyed by node index.
///
/// Unlisted nodes receive no teleport mass. Validation rescales the weights in place when
/// they sum to more than 1.0; a vector summing to less than 1.0 is kept as given and the
/// missing mass is simply not teleported anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Personalization(BTreeMap<usize, f64>);

impl Personalization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of `node`, returning the previous weight if any.
    pub fn insert(&mut self, node: usize, weight: f64) -> Option<f64> {
        self.0.insert(node, weight)
    }

    pub fn get(&self, node: usize) -> Option<f64> {
        self.0.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(node, weight)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(&node, &weight)| (node, weight))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub(crate) fn divide_by(&mut self, divisor: f64) {
        for w in self.0.values_mut() {
            *w /= divisor;
        }
    }

    pub fn into_inner(self) -> BTreeMap<usize, f64> {
        self.0
    }
}

impl From<BTreeMap<usize, f64>> for Personalization {
    fn from(map: BTreeMap<usize, f64>) -> Self {
        Self(map)
    }
}

impl FromIterator<(usize, f64)> for Personalization {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Personalized PageRank.
///
/// `personalization` is validated and, if its weights sum to more than 1.0, rescaled in
/// place before the solver runs. The rescaled vector stays visible to the caller.
pub fn personalized_pagerank<G: GraphRef + ?Sized>(
    graph: &G,
    config: PageRankConfig,
    personalization: &mut Personalization,
) -> Result<Vec<f64>> {
    Ok(personalized_pagerank_run(graph, config, personalization)?.scores)
}

pub fn personalized_pagerank_run<G: GraphRef + ?Sized>(
    graph: &G,
    config: PageRankConfig,
    personalization: &mut Personalization,
) -> Result<PageRankRun> {
    validate_input(graph, Some(&mut *personalization), &config)?;
    Ok(solve(graph, Some(&*personalization), config))
}
