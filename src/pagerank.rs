//! PageRank centrality by power iteration.

use crate::graph::GraphRef;
use crate::ppr::Personalization;
use crate::validate::validate_input;
use crate::{Error, Result};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankRun {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub max_delta: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Probability of following an out-edge rather than teleporting. In `[0, 1]`.
    pub damping: f64,
    /// Iteration cap `K`. The solver performs at most `K - 1` update passes.
    pub max_iterations: usize,
    /// Convergence threshold on the largest per-node change. In `(0, 1)`.
    pub threshold: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 1000,
            threshold: 0.001,
        }
    }
}

impl PageRankConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidIterationCount(self.max_iterations.to_string()));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidDamping(self.damping));
        }
        Ok(())
    }
}

/// PageRank with uniform teleportation.
pub fn pagerank<G: GraphRef + ?Sized>(graph: &G, config: PageRankConfig) -> Result<Vec<f64>> {
    Ok(pagerank_run(graph, config)?.scores)
}

/// PageRank with convergence reporting.
///
/// `iterations` is the number of update passes performed.
/// `max_delta` is the largest absolute per-node change of the last pass, measured on the
/// unnormalized running scores.
pub fn pagerank_run<G: GraphRef + ?Sized>(graph: &G, config: PageRankConfig) -> Result<PageRankRun> {
    validate_input(graph, None, &config)?;
    Ok(solve(graph, None, config))
}

/// PageRank with optional personalization and a completion hook.
///
/// `on_complete` is called exactly once with the final scores after a successful run and
/// never on a validation error. Its return value is discarded.
pub fn pagerank_with_callback<G, F, R>(
    graph: &G,
    config: PageRankConfig,
    mut personalization: Option<&mut Personalization>,
    on_complete: F,
) -> Result<Vec<f64>>
where
    G: GraphRef + ?Sized,
    F: FnOnce(&[f64]) -> R,
{
    validate_input(graph, personalization.as_deref_mut(), &config)?;
    let run = solve(graph, personalization.as_deref(), config);
    let _ = on_complete(&run.scores);
    Ok(run.scores)
}

/// Power iteration over already-validated inputs.
///
/// Scores start at 1.0 per node (not `1/n`); the final division by the last pass's sum
/// makes the output scale-free. The loop counter starts at 1 and is bumped before each
/// pass, so a cap of `K` allows `K - 1` passes.
pub(crate) fn solve<G: GraphRef + ?Sized>(
    graph: &G,
    personalization: Option<&Personalization>,
    config: PageRankConfig,
) -> PageRankRun {
    let n = graph.node_count();
    if n == 0 {
        return PageRankRun {
            scores: Vec::new(),
            iterations: 0,
            max_delta: 0.0,
            converged: true,
        };
    }
    let n_f64 = n as f64;
    let damping = config.damping;
    let mut scores = vec![1.0; n];
    let mut new_scores = vec![0.0; n];
    let mut sum = n_f64;
    let dangling: Vec<usize> = (0..n).filter(|&u| graph.is_dangling(u)).collect();

    let mut iteration = 1usize;
    let mut passes = 0usize;
    let mut last_delta = f64::INFINITY;
    let mut converged = false;
    while iteration < config.max_iterations {
        iteration += 1;
        passes += 1;

        // dangling mass goes to every node, not only the teleport targets
        let dangling_sum: f64 = dangling.iter().map(|&u| scores[u]).sum();
        let dangling_contrib = damping * dangling_sum / n_f64;
        match personalization {
            None => new_scores.fill((1.0 - damping) / n_f64 + dangling_contrib),
            Some(p) => {
                new_scores.fill(dangling_contrib);
                for (u, weight) in p.iter() {
                    new_scores[u] += (1.0 - damping) * weight;
                }
            }
        }

        for u in 0..n {
            let neighbors = graph.neighbors_ref(u);
            if !neighbors.is_empty() {
                let share = damping * scores[u] / neighbors.len() as f64;
                for &v in neighbors {
                    new_scores[v] += share;
                }
            }
        }

        sum = new_scores.iter().sum();
        let delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, f64::max);
        last_delta = delta;
        std::mem::swap(&mut scores, &mut new_scores);
        tracing::trace!(pass = passes, delta, sum, "pagerank pass");
        if delta < config.threshold {
            converged = true;
            break;
        }
    }

    for s in scores.iter_mut() {
        *s /= sum;
    }
    tracing::debug!(
        nodes = n,
        passes,
        max_delta = last_delta,
        converged,
        "pagerank finished"
    );

    PageRankRun {
        scores,
        iterations: passes,
        max_delta: last_delta,
        converged,
    }
}
