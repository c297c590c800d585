//! Single-graph edge list generation.
//!
//! A synthetic supply-chain graph has six fixed hub companies (node ids
//! `0..6`) and a variable pool of peripheral companies (ids `6..n_nodes`).
//! Each hub draws a supplier set and a customer set from the peripheral pool
//! without replacement and every edge carries a weight sampled from a normal
//! distribution whose mean scales with `ln(n_nodes)`. Edges with non-positive
//! weights are discarded, so a generated list may legitimately be empty.

use rand::{Rng, rngs::SmallRng, seq::index};
use rand_distr::{Distribution, Normal};

use crate::error::ConfigError;

/// Number of fixed hub companies present in every graph.
pub const HUB_COUNT: usize = 6;

/// Smallest supported node count: the six hubs plus a two-node peripheral
/// pool, matching the `+8` shift applied to drawn node counts.
pub const MIN_NODE_COUNT: usize = 8;

pub(crate) const DEFAULT_REL_RATIO_MIN: f64 = 0.1;
pub(crate) const DEFAULT_REL_RATIO_MAX: f64 = 0.3;
pub(crate) const DEFAULT_NODE_SCALE_MU: f64 = 4.5;
pub(crate) const DEFAULT_WEIGHT_MU: f64 = 2.0;
pub(crate) const DEFAULT_WEIGHT_SIGMA: f64 = 0.5;

/// A directed weighted edge between two companies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Source node id.
    pub src: usize,
    /// Destination node id.
    pub dst: usize,
    /// Relationship weight; always positive after filtering.
    pub weight: f64,
}

/// Configuration for generating a single graph's edge list.
#[derive(Clone, Debug)]
pub struct EdgeListConfig {
    /// Total node count, hubs included.
    pub n_nodes: usize,
    /// Lower bound on the per-hub relation count as a fraction of the
    /// peripheral pool.
    pub rel_ratio_min: f64,
    /// Upper bound on the per-hub relation count as a fraction of the
    /// peripheral pool.
    pub rel_ratio_max: f64,
    /// Log-scale node count location parameter; the weight mean divides by it
    /// so typical graphs centre their weights near `weight_mu`.
    pub n_nodes_mu: f64,
    /// Base edge weight mean before log scaling.
    pub weight_mu: f64,
    /// Edge weight standard deviation.
    pub weight_sigma: f64,
}

impl EdgeListConfig {
    /// Creates a configuration for `n_nodes` nodes with default relation and
    /// weight parameters.
    ///
    /// # Examples
    /// ```
    /// use keiretsu_core::EdgeListConfig;
    ///
    /// let config = EdgeListConfig::with_n_nodes(20);
    /// assert_eq!(config.n_nodes, 20);
    /// ```
    #[must_use]
    pub const fn with_n_nodes(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            rel_ratio_min: DEFAULT_REL_RATIO_MIN,
            rel_ratio_max: DEFAULT_REL_RATIO_MAX,
            n_nodes_mu: DEFAULT_NODE_SCALE_MU,
            weight_mu: DEFAULT_WEIGHT_MU,
            weight_sigma: DEFAULT_WEIGHT_SIGMA,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.n_nodes < MIN_NODE_COUNT {
            return Err(ConfigError::NodeCountTooSmall {
                n_nodes: self.n_nodes,
            });
        }
        validate_positive_param(self.n_nodes_mu, "n_nodes_mu")?;
        validate_positive_param(self.weight_mu, "weight_mu")?;
        validate_positive_param(self.weight_sigma, "weight_sigma")?;
        validate_relation_ratios(self.rel_ratio_min, self.rel_ratio_max)
    }
}

pub(crate) fn validate_positive_param(
    value: f64,
    parameter: &'static str,
) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFloatParameter { parameter })
    }
}

pub(crate) fn validate_relation_ratios(min: f64, max: f64) -> Result<(), ConfigError> {
    let valid = min.is_finite() && max.is_finite() && min > 0.0 && min < max && max <= 1.0;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidRelationRatios { min, max })
    }
}

/// Generates the retained edge list for one synthetic supply-chain graph.
///
/// Each hub's supplier and customer counts are drawn uniformly from the
/// relation bounds, the counterparties are sampled from the peripheral pool
/// without replacement, and hub blocks are concatenated in hub order with
/// supplier edges preceding customer edges. Edges whose sampled weight is not
/// strictly positive are dropped, so the result may be empty; callers that
/// require a non-empty graph retry with fresh draws.
///
/// # Errors
/// Returns [`ConfigError`] when the configuration is invalid or the relation
/// count bounds collapse to an empty range for this node count.
///
/// # Examples
/// ```
/// use keiretsu_core::{EdgeListConfig, generate_edgelist};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(123);
/// let edges = generate_edgelist(&EdgeListConfig::with_n_nodes(20), &mut rng)?;
/// assert!(edges.iter().all(|edge| edge.weight > 0.0));
/// # Ok::<(), keiretsu_core::ConfigError>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "the node count feeds a logarithm where precision loss is immaterial"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "edge weight sampling requires floating-point arithmetic"
)]
pub fn generate_edgelist(
    config: &EdgeListConfig,
    rng: &mut SmallRng,
) -> Result<Vec<Edge>, ConfigError> {
    config.validate()?;
    let pool = config.n_nodes - HUB_COUNT;
    let (rel_min, rel_max) = relation_bounds(pool, config.rel_ratio_min, config.rel_ratio_max)?;
    let mean = config.weight_mu * (config.n_nodes as f64).ln() / config.n_nodes_mu;
    let weights = Normal::new(mean, config.weight_sigma).map_err(|_| {
        ConfigError::InvalidFloatParameter {
            parameter: "weight_sigma",
        }
    })?;

    let mut edges = Vec::new();
    for hub in 0..HUB_COUNT {
        let n_suppliers = rng.gen_range(rel_min..rel_max);
        let n_customers = rng.gen_range(rel_min..rel_max);
        for peripheral in sample_peripherals(rng, pool, n_suppliers) {
            edges.push(Edge {
                src: hub,
                dst: peripheral,
                weight: weights.sample(rng),
            });
        }
        for peripheral in sample_peripherals(rng, pool, n_customers) {
            edges.push(Edge {
                src: peripheral,
                dst: hub,
                weight: weights.sample(rng),
            });
        }
    }

    edges.retain(|edge| edge.weight > 0.0);
    Ok(edges)
}

/// Resolves the half-open `[rel_min, rel_max)` relation count range for a
/// peripheral pool. An upper bound at or below one is clamped to two so small
/// pools still admit a draw.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ratio products are non-negative and bounded by the pool size"
)]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "relation bounds are defined as a fraction of the pool size"
)]
fn relation_bounds(
    pool: usize,
    ratio_min: f64,
    ratio_max: f64,
) -> Result<(usize, usize), ConfigError> {
    let rel_min = (pool as f64 * ratio_min) as usize;
    let mut rel_max = (pool as f64 * ratio_max) as usize;
    if rel_max <= 1 {
        rel_max = 2;
    }
    if rel_min >= rel_max {
        return Err(ConfigError::DegenerateRelationBounds { rel_min, rel_max });
    }
    Ok((rel_min, rel_max))
}

/// Samples `amount` distinct peripheral node ids. The caller guarantees
/// `amount` never exceeds the pool size: relation bounds are a sub-unit
/// fraction of the pool, and the clamped bound of two only applies to pools
/// of at least two nodes.
fn sample_peripherals(rng: &mut SmallRng, pool: usize, amount: usize) -> Vec<usize> {
    index::sample(rng, pool, amount)
        .iter()
        .map(|offset| offset + HUB_COUNT)
        .collect()
}
