//! Input validation.
//!
//! Every check runs before the solver touches the graph. Parameter ranges are checked
//! first, then graph indices, then the personalization vector, so the first reported
//! error is stable for a given input.

use crate::graph::GraphRef;
use crate::pagerank::PageRankConfig;
use crate::ppr::Personalization;
use crate::{Error, Result};

/// Convert a loosely typed iteration cap (e.g. a JSON number) into a `usize`.
///
/// Rejects non-finite, non-integer, and non-positive values.
pub fn iteration_cap(value: f64) -> Result<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 {
        return Err(Error::InvalidIterationCount(value.to_string()));
    }
    if value >= usize::MAX as f64 {
        return Err(Error::InvalidIterationCount(value.to_string()));
    }
    Ok(value as usize)
}

/// Validate `graph`, `config` and the optional personalization vector.
///
/// On success a personalization vector whose weights sum to more than 1.0 has been
/// rescaled in place so that it sums to 1.0. Vectors summing to at most 1.0 (within
/// summation rounding) are left untouched, so validating twice changes nothing.
/// A vector whose weights sum to 0 is rejected: it would leave no teleport mass at all.
pub fn validate_input<G: GraphRef + ?Sized>(
    graph: &G,
    personalization: Option<&mut Personalization>,
    config: &PageRankConfig,
) -> Result<()> {
    config.validate()?;
    check_graph_indices(graph)?;
    if let Some(p) = personalization {
        check_personalization(p, graph.node_count())?;
        normalize_personalization(p);
    }
    Ok(())
}

fn check_graph_indices<G: GraphRef + ?Sized>(graph: &G) -> Result<()> {
    let n = graph.node_count();
    for node in 0..n {
        if let Some(&target) = graph.neighbors_ref(node).iter().find(|&&v| v >= n) {
            return Err(Error::GraphIndexOutOfBounds {
                node,
                target,
                node_count: n,
            });
        }
    }
    Ok(())
}

fn check_personalization(personalization: &Personalization, node_count: usize) -> Result<()> {
    for (node, weight) in personalization.iter() {
        if node >= node_count {
            return Err(Error::PersonalizationIndexOutOfBounds { node, node_count });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidPersonalizationWeight { node, weight });
        }
    }
    if personalization.sum() <= 0.0 {
        return Err(Error::ZeroPersonalizationSum);
    }
    Ok(())
}

fn normalize_personalization(personalization: &mut Personalization) {
    let sum = personalization.sum();
    // rounding in the sum of an already rescaled vector stays within len * eps
    if sum - 1.0 > f64::EPSILON * personalization.len() as f64 {
        tracing::warn!(sum, "personalization weights sum to more than 1; rescaling");
        personalization.divide_by(sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Run validation on `p` and return how many warnings it emitted.
    fn warnings_while_validating(p: &mut Personalization) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, || {
            validate_input(&cycle(), Some(p), &PageRankConfig::default()).unwrap();
        });
        count.load(Ordering::SeqCst)
    }

    fn cycle() -> Vec<Vec<usize>> {
        vec![vec![1], vec![2], vec![0]]
    }

    #[test]
    fn iteration_cap_accepts_positive_integers() {
        assert_eq!(iteration_cap(1.0).unwrap(), 1);
        assert_eq!(iteration_cap(200.0).unwrap(), 200);
    }

    #[test]
    fn iteration_cap_rejects_fractional_and_non_positive() {
        for bad in [1.1, -2.0, 0.0, f64::NAN, f64::INFINITY, usize::MAX as f64] {
            let err = iteration_cap(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidIterationCount(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn out_of_range_neighbor_is_reported_with_its_source() {
        let adj = vec![vec![1], vec![0, 7]];
        let err = validate_input(&adj, None, &PageRankConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::GraphIndexOutOfBounds {
                node: 1,
                target: 7,
                node_count: 2
            }
        );
    }

    #[test]
    fn single_node_self_reference_out_of_range() {
        let adj = vec![vec![1]];
        let err = validate_input(&adj, None, &PageRankConfig::default()).unwrap_err();
        assert!(matches!(err, Error::GraphIndexOutOfBounds { target: 1, .. }));
    }

    #[test]
    fn parameter_errors_come_before_structural_errors() {
        let adj = vec![vec![9]];
        let config = PageRankConfig::default().with_damping(1.5);
        let err = validate_input(&adj, None, &config).unwrap_err();
        assert_eq!(err, Error::InvalidDamping(1.5));
    }

    #[test]
    fn personalization_key_out_of_range() {
        let adj = vec![vec![1], vec![0]];
        let mut p = Personalization::from_iter([(2, 0.8)]);
        let err = validate_input(&adj, Some(&mut p), &PageRankConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::PersonalizationIndexOutOfBounds {
                node: 2,
                node_count: 2
            }
        );
    }

    #[test]
    fn negative_personalization_weight_is_rejected() {
        let mut p = Personalization::from_iter([(0, 0.5), (1, -0.1)]);
        let err = validate_input(&cycle(), Some(&mut p), &PageRankConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPersonalizationWeight { node: 1, .. }
        ));
    }

    #[test]
    fn heavy_personalization_is_rescaled_in_place() {
        let mut p = Personalization::from_iter([(0, 1.0), (1, 1.0), (2, 2.0)]);
        validate_input(&cycle(), Some(&mut p), &PageRankConfig::default()).unwrap();
        assert_eq!(p.get(0), Some(0.25));
        assert_eq!(p.get(1), Some(0.25));
        assert_eq!(p.get(2), Some(0.5));
    }

    #[test]
    fn leaky_personalization_is_left_alone() {
        let mut p = Personalization::from_iter([(0, 0.3), (2, 0.2)]);
        let before = p.clone();
        validate_input(&cycle(), Some(&mut p), &PageRankConfig::default()).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn zero_sum_personalization_is_rejected() {
        for mut p in [
            Personalization::new(),
            Personalization::from_iter([(0, 0.0)]),
            Personalization::from_iter([(0, 0.0), (2, 0.0)]),
        ] {
            for damping in [0.0, 0.85] {
                let config = PageRankConfig::default().with_damping(damping);
                let err = validate_input(&cycle(), Some(&mut p), &config).unwrap_err();
                assert_eq!(err, Error::ZeroPersonalizationSum);
            }
        }
    }

    #[test]
    fn rescale_warns_only_when_sum_exceeds_one() {
        let mut heavy = Personalization::from_iter([(0, 1.0), (1, 1.0), (2, 2.0)]);
        assert_eq!(warnings_while_validating(&mut heavy), 1);
        assert_eq!(warnings_while_validating(&mut heavy), 0);

        let mut exact = Personalization::from_iter([(0, 0.5), (1, 0.5)]);
        assert_eq!(warnings_while_validating(&mut exact), 0);

        let mut leaky = Personalization::from_iter([(1, 0.4)]);
        assert_eq!(warnings_while_validating(&mut leaky), 0);
    }

    proptest! {
        #[test]
        fn prop_normalization_is_idempotent(
            weights in proptest::collection::vec(0.0f64..10.0, 1..4),
        ) {
            prop_assume!(weights.iter().sum::<f64>() > 0.0);
            let mut p: Personalization = weights.into_iter().enumerate().collect();
            let config = PageRankConfig::default();
            validate_input(&cycle(), Some(&mut p), &config).unwrap();
            let once = p.clone();
            validate_input(&cycle(), Some(&mut p), &config).unwrap();
            prop_assert_eq!(&p, &once);
            prop_assert!(p.sum() <= 1.0 + f64::EPSILON * p.len() as f64);
        }
    }
}
