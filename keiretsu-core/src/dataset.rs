//! Dataset orchestration: many graphs, flat-file output, target labels.
//!
//! A dataset is a directory of numbered `.edgelist` files plus one
//! `target.csv` holding a binary label per graph. Node counts are drawn from
//! a log-normal distribution shifted by eight so every graph holds the six
//! hubs and at least two peripheral companies; labels are drawn with
//! probability `sqrt(6 / n_nodes)` so smaller graphs are more likely to be
//! positive.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand_distr::{Bernoulli, Distribution, LogNormal};
use tracing::{Span, debug, field, info, instrument};

use crate::edgelist::{
    DEFAULT_NODE_SCALE_MU, DEFAULT_REL_RATIO_MAX, DEFAULT_REL_RATIO_MIN, DEFAULT_WEIGHT_MU,
    DEFAULT_WEIGHT_SIGMA, Edge, EdgeListConfig, HUB_COUNT, MIN_NODE_COUNT, generate_edgelist,
    validate_positive_param, validate_relation_ratios,
};
use crate::error::{ConfigError, DatasetError};
use crate::writer::{write_edgelist, write_targets};

const DEFAULT_GRAPH_COUNT: usize = 1000;
const DEFAULT_NODE_SCALE_SIGMA: f64 = 1.0;

/// One row of `target.csv`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TargetRecord {
    /// Graph index the label belongs to.
    pub company_id: usize,
    /// Binary label in `{0, 1}`.
    pub target: u8,
}

/// Summary of one generated dataset, suitable for CLI rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatasetSummary {
    /// Number of graphs written.
    pub graphs: usize,
    /// Total retained edges across all graphs.
    pub edges: usize,
    /// Number of positive labels in `target.csv`.
    pub positives: usize,
    /// Directory the dataset was written to.
    pub output_dir: PathBuf,
}

/// Configures and constructs [`DatasetGenerator`] instances.
///
/// # Examples
/// ```
/// use keiretsu_core::DatasetBuilder;
///
/// let generator = DatasetBuilder::new()
///     .with_graph_count(4)
///     .with_node_scale(4.5, 1.0)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.n_graphs(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DatasetBuilder {
    n_graphs: usize,
    n_nodes_mu: f64,
    n_nodes_sigma: f64,
    rel_ratio_min: f64,
    rel_ratio_max: f64,
    weight_mu: f64,
    weight_sigma: f64,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self {
            n_graphs: DEFAULT_GRAPH_COUNT,
            n_nodes_mu: DEFAULT_NODE_SCALE_MU,
            n_nodes_sigma: DEFAULT_NODE_SCALE_SIGMA,
            rel_ratio_min: DEFAULT_REL_RATIO_MIN,
            rel_ratio_max: DEFAULT_REL_RATIO_MAX,
            weight_mu: DEFAULT_WEIGHT_MU,
            weight_sigma: DEFAULT_WEIGHT_SIGMA,
        }
    }
}

impl DatasetBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of graphs to generate.
    #[must_use]
    pub fn with_graph_count(mut self, n_graphs: usize) -> Self {
        self.n_graphs = n_graphs;
        self
    }

    /// Overrides the log-normal node count parameters.
    #[must_use]
    pub fn with_node_scale(mut self, mu: f64, sigma: f64) -> Self {
        self.n_nodes_mu = mu;
        self.n_nodes_sigma = sigma;
        self
    }

    /// Overrides the per-hub relation ratio bounds.
    #[must_use]
    pub fn with_relation_ratios(mut self, min: f64, max: f64) -> Self {
        self.rel_ratio_min = min;
        self.rel_ratio_max = max;
        self
    }

    /// Overrides the edge weight distribution parameters.
    #[must_use]
    pub fn with_weight_params(mut self, mu: f64, sigma: f64) -> Self {
        self.weight_mu = mu;
        self.weight_sigma = sigma;
        self
    }

    /// Validates the configuration and constructs a [`DatasetGenerator`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the graph count is zero, a distribution
    /// parameter is non-finite or non-positive, or the relation ratios do not
    /// satisfy `0 < min < max <= 1`.
    pub fn build(self) -> Result<DatasetGenerator, ConfigError> {
        if self.n_graphs == 0 {
            return Err(ConfigError::ZeroGraphs);
        }
        validate_positive_param(self.n_nodes_mu, "n_nodes_mu")?;
        validate_positive_param(self.n_nodes_sigma, "n_nodes_sigma")?;
        validate_positive_param(self.weight_mu, "weight_mu")?;
        validate_positive_param(self.weight_sigma, "weight_sigma")?;
        validate_relation_ratios(self.rel_ratio_min, self.rel_ratio_max)?;
        Ok(DatasetGenerator { config: self })
    }
}

/// Generates datasets of synthetic supply-chain graphs on disk.
///
/// Construct via [`DatasetBuilder`]; the generator itself is immutable and
/// may be reused for several output directories, drawing from the same RNG
/// stream each time.
#[derive(Clone, Debug)]
pub struct DatasetGenerator {
    config: DatasetBuilder,
}

impl DatasetGenerator {
    /// Returns the number of graphs generated per dataset.
    #[must_use]
    pub const fn n_graphs(&self) -> usize {
        self.config.n_graphs
    }

    /// Generates one dataset into `dir`, creating the directory if needed.
    ///
    /// Writes `<i>.edgelist` for every graph index `i` (comma-separated
    /// `src,dst,weight`, no header) and a `target.csv` with header
    /// `company_id,target`. Graphs whose edge list comes back empty after the
    /// positive-weight filter are regenerated with fresh draws until they
    /// yield at least one edge.
    ///
    /// # Errors
    /// Returns [`DatasetError`] when the output directory or a file cannot be
    /// written, or when a per-graph configuration is rejected.
    ///
    /// # Examples
    /// ```
    /// use keiretsu_core::DatasetBuilder;
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let dir = tempfile::tempdir()?;
    /// let generator = DatasetBuilder::new().with_graph_count(2).build()?;
    /// let mut rng = SmallRng::seed_from_u64(123);
    /// let summary = generator.generate_into(dir.path(), &mut rng)?;
    /// assert_eq!(summary.graphs, 2);
    /// assert!(dir.path().join("target.csv").exists());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "dataset.generate",
        err,
        skip(self, dir, rng),
        fields(dir = field::Empty, graphs = field::Empty),
    )]
    pub fn generate_into(
        &self,
        dir: &Path,
        rng: &mut SmallRng,
    ) -> Result<DatasetSummary, DatasetError> {
        let span = Span::current();
        span.record("dir", field::display(dir.display()));
        span.record("graphs", field::display(self.config.n_graphs));

        fs::create_dir_all(dir).map_err(|source| DatasetError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let node_counts = self.draw_node_counts(rng)?;
        let mut edge_total = 0_usize;
        for (index, &n_nodes) in node_counts.iter().enumerate() {
            let edges = self.generate_retained(index, n_nodes, rng)?;
            edge_total = edge_total.saturating_add(edges.len());
            write_edgelist(&dir.join(format!("{index}.edgelist")), &edges)?;
        }

        let targets = draw_targets(&node_counts, rng)?;
        let positives = targets.iter().filter(|record| record.target == 1).count();
        write_targets(&dir.join("target.csv"), &targets)?;

        info!(
            graphs = self.config.n_graphs,
            edges = edge_total,
            positives,
            "dataset written"
        );
        Ok(DatasetSummary {
            graphs: self.config.n_graphs,
            edges: edge_total,
            positives,
            output_dir: dir.to_path_buf(),
        })
    }

    /// Draws one node count per graph from the configured log-normal
    /// distribution, truncated to an integer and shifted by eight.
    fn draw_node_counts(&self, rng: &mut SmallRng) -> Result<Vec<usize>, DatasetError> {
        let counts = LogNormal::new(self.config.n_nodes_mu, self.config.n_nodes_sigma).map_err(
            |_| ConfigError::InvalidFloatParameter {
                parameter: "n_nodes_sigma",
            },
        )?;
        Ok((0..self.config.n_graphs)
            .map(|_| truncate_node_count(counts.sample(rng)))
            .collect())
    }

    /// Generates one graph's edge list, retrying until the positive-weight
    /// filter leaves at least one edge.
    fn generate_retained(
        &self,
        index: usize,
        n_nodes: usize,
        rng: &mut SmallRng,
    ) -> Result<Vec<Edge>, DatasetError> {
        let config = EdgeListConfig {
            n_nodes,
            rel_ratio_min: self.config.rel_ratio_min,
            rel_ratio_max: self.config.rel_ratio_max,
            n_nodes_mu: self.config.n_nodes_mu,
            weight_mu: self.config.weight_mu,
            weight_sigma: self.config.weight_sigma,
        };
        loop {
            let edges = generate_edgelist(&config, rng)?;
            if !edges.is_empty() {
                return Ok(edges);
            }
            debug!(
                graph = index,
                n_nodes, "edge list empty after weight filter, regenerating"
            );
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "log-normal samples are positive and saturate on overflow"
)]
fn truncate_node_count(sample: f64) -> usize {
    (sample as usize).saturating_add(MIN_NODE_COUNT)
}

/// Draws one Bernoulli label per graph with probability `sqrt(6 / n_nodes)`.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "label probabilities are derived from node counts"
)]
fn draw_targets(
    node_counts: &[usize],
    rng: &mut SmallRng,
) -> Result<Vec<TargetRecord>, DatasetError> {
    node_counts
        .iter()
        .enumerate()
        .map(|(company_id, &n_nodes)| {
            let probability = (HUB_COUNT as f64 / n_nodes as f64).sqrt().min(1.0);
            let label = Bernoulli::new(probability).map_err(|_| DatasetError::LabelProbability {
                probability,
                n_nodes,
            })?;
            Ok(TargetRecord {
                company_id,
                target: u8::from(label.sample(rng)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rstest::rstest;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[rstest]
    fn builder_rejects_zero_graphs() {
        let error = DatasetBuilder::new()
            .with_graph_count(0)
            .build()
            .expect_err("zero graphs must fail");
        assert!(matches!(error, ConfigError::ZeroGraphs));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-1.0)]
    #[case::infinite(f64::INFINITY)]
    fn builder_rejects_invalid_node_sigma(#[case] sigma: f64) {
        let error = DatasetBuilder::new()
            .with_node_scale(4.5, sigma)
            .build()
            .expect_err("invalid sigma must fail");
        assert!(matches!(
            error,
            ConfigError::InvalidFloatParameter {
                parameter: "n_nodes_sigma"
            }
        ));
    }

    #[rstest]
    fn builder_rejects_inverted_ratios() {
        let error = DatasetBuilder::new()
            .with_relation_ratios(0.5, 0.2)
            .build()
            .expect_err("inverted ratios must fail");
        assert!(matches!(error, ConfigError::InvalidRelationRatios { .. }));
    }

    #[rstest]
    fn drawn_node_counts_respect_the_shift() {
        let generator = DatasetBuilder::new()
            .with_graph_count(256)
            .build()
            .expect("default configuration is valid");
        let counts = generator
            .draw_node_counts(&mut rng(41))
            .expect("node count draws should succeed");
        assert_eq!(counts.len(), 256);
        assert!(counts.iter().all(|&n| n >= MIN_NODE_COUNT));
    }

    #[rstest]
    fn labels_are_binary_and_indexed() {
        let records =
            draw_targets(&[8, 20, 90, 400], &mut rng(43)).expect("label draws should succeed");
        assert_eq!(records.len(), 4);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.company_id, index);
            assert!(record.target <= 1);
        }
    }

    #[rstest]
    fn retained_graphs_are_never_empty() {
        let generator = DatasetBuilder::new()
            .build()
            .expect("default configuration is valid");
        let edges = generator
            .generate_retained(0, MIN_NODE_COUNT, &mut rng(47))
            .expect("retry loop should converge");
        assert!(!edges.is_empty());
    }
}
