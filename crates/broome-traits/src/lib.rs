#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use polars::prelude::{LazyFrame, PolarsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while computing a factor.
#[derive(Debug, Error)]
pub enum FactorError {
    /// The input frame is missing columns the factor requires.
    #[error("factor '{factor}' is missing required columns: {columns:?}")]
    MissingColumns {
        /// Name of the factor that failed.
        factor: String,
        /// Columns that were absent from the input.
        columns: Vec<String>,
    },

    /// Underlying polars computation failed.
    #[error("factor computation error: {0}")]
    Computation(#[from] PolarsError),

    /// The factor received an invalid configuration.
    #[error("invalid factor configuration: {0}")]
    InvalidConfig(String),
}

/// How a factor's output participates in the pipeline.
///
/// The kind is a contract, not a hint: only [`FactorKind::Ranked`] columns
/// may feed the composite score. `Screening` factors feed the universe
/// filter, and `Informational` factors are surfaced in pipeline output for
/// calibration but never ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    /// Participates in ranking and the composite score.
    Ranked,
    /// Feeds universe screens only.
    Screening,
    /// Observable output only; excluded from ranking and selection.
    Informational,
}

/// A per-security factor computed from snapshot or history data.
///
/// Implementations are pure: the same input frame always produces the same
/// scores, and null inputs propagate null scores (no imputation).
pub trait Factor {
    /// Unique factor name, used as the output column name.
    fn name(&self) -> &str;

    /// How this factor's output participates in the pipeline.
    fn kind(&self) -> FactorKind;

    /// Compute the factor column.
    ///
    /// The returned frame contains `symbol` plus one column named after the
    /// factor. Rows with null inputs carry a null score.
    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError>;

    /// Columns the input frame must provide.
    fn required_columns(&self) -> &[&str];
}

/// A factor constructed from a configuration struct.
pub trait ConfiguredFactor: Factor {
    /// Configuration type for this factor.
    type Config;

    /// Build the factor from a configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Access the factor's configuration.
    fn config(&self) -> &Self::Config;
}
