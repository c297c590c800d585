//! Error types for the keiretsu core library.
//!
//! Defines the error enums exposed by the public API, stable machine-readable
//! code enums for each of them, and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while validating generator configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The requested graph count was zero.
    #[error("graph count must be greater than zero")]
    ZeroGraphs,
    /// The requested node count cannot accommodate the hub companies plus a
    /// minimal peripheral pool.
    #[error("node count must be at least 8 (got {n_nodes})")]
    NodeCountTooSmall {
        /// The invalid node count supplied by the caller.
        n_nodes: usize,
    },
    /// A floating-point generator parameter was non-finite or non-positive.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Name of the invalid parameter.
        parameter: &'static str,
    },
    /// The relation ratio bounds were outside `0 < min < max <= 1`.
    #[error("relation ratios must satisfy 0 < min < max <= 1 (got min={min}, max={max})")]
    InvalidRelationRatios {
        /// Configured lower ratio bound.
        min: f64,
        /// Configured upper ratio bound.
        max: f64,
    },
    /// The per-hub relation count bounds collapsed to an empty range.
    #[error("relation count bounds are degenerate for this node count: min={rel_min}, max={rel_max}")]
    DegenerateRelationBounds {
        /// Lower relation count bound (inclusive).
        rel_min: usize,
        /// Upper relation count bound (exclusive).
        rel_max: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// The requested graph count was zero.
        ZeroGraphs => ZeroGraphs => "CONFIG_ZERO_GRAPHS",
        /// The requested node count was below the supported minimum.
        NodeCountTooSmall => NodeCountTooSmall { .. } => "CONFIG_NODE_COUNT_TOO_SMALL",
        /// A floating-point generator parameter was invalid.
        InvalidFloatParameter => InvalidFloatParameter { .. } => "CONFIG_INVALID_FLOAT_PARAMETER",
        /// The relation ratio bounds were invalid.
        InvalidRelationRatios => InvalidRelationRatios { .. } => "CONFIG_INVALID_RELATION_RATIOS",
        /// The per-hub relation count bounds collapsed to an empty range.
        DegenerateRelationBounds => DegenerateRelationBounds { .. } => "CONFIG_DEGENERATE_RELATION_BOUNDS",
    }
}

/// Error type produced while generating a dataset on disk.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The generator configuration was rejected.
    #[error("invalid generator configuration: {source}")]
    Config {
        /// Underlying validation failure.
        #[from]
        source: ConfigError,
    },
    /// Creating the output directory failed.
    #[error("failed to create output directory `{path}`: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A derived label probability fell outside `[0, 1]`.
    #[error("label probability {probability} for {n_nodes} nodes is outside [0, 1]")]
    LabelProbability {
        /// Probability derived from the node count.
        probability: f64,
        /// Node count the probability was derived from.
        n_nodes: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DatasetError`] variants.
    enum DatasetErrorCode for DatasetError {
        /// The generator configuration was rejected.
        InvalidConfig => Config { .. } => "DATASET_INVALID_CONFIG",
        /// Creating the output directory failed.
        CreateDir => CreateDir { .. } => "DATASET_CREATE_DIR",
        /// Writing an output file failed.
        WriteFailure => Write { .. } => "DATASET_WRITE_FAILURE",
        /// A derived label probability fell outside the unit interval.
        LabelProbability => LabelProbability { .. } => "DATASET_LABEL_PROBABILITY",
    }
}

impl DatasetError {
    /// Retrieve the inner [`ConfigErrorCode`] when the error originated in
    /// configuration validation.
    pub const fn config_code(&self) -> Option<ConfigErrorCode> {
        match self {
            Self::Config { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DatasetError>;
