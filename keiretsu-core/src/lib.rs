//! Keiretsu core library.
//!
//! Synthesises random weighted directed graphs representing toy supply-chain
//! networks, plus a binary target label per graph. Each graph links six fixed
//! hub companies to a log-normally sized pool of peripheral suppliers and
//! customers; datasets are written as flat files (`<i>.edgelist` per graph
//! and a single indexed `target.csv`).
//!
//! Generation is fully deterministic under a fixed seed: every draw flows
//! through one explicitly threaded [`rand::rngs::SmallRng`].

mod dataset;
mod edgelist;
mod error;
mod writer;

pub use crate::{
    dataset::{DatasetBuilder, DatasetGenerator, DatasetSummary, TargetRecord},
    edgelist::{Edge, EdgeListConfig, HUB_COUNT, MIN_NODE_COUNT, generate_edgelist},
    error::{ConfigError, ConfigErrorCode, DatasetError, DatasetErrorCode, Result},
    writer::{write_edgelist, write_targets},
};
