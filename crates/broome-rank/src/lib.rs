#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod composite;
pub mod rank;
pub mod select;
pub mod table;

pub use composite::composite_rank;
pub use rank::average_rank;
pub use select::{SelectionSet, quantile_buckets, select_bottom, select_top};
pub use table::{RankColumn, RankTable};

use thiserror::Error;

/// Errors from ranking and selection operations.
#[derive(Debug, Error)]
pub enum RankError {
    /// Quantile bucketing needs at least one bucket.
    #[error("bucket count must be at least 1, got {0}")]
    InvalidBucketCount(usize),
}
