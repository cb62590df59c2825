#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export main types from sub-crates
pub use broome_factors as factors;
pub use broome_output as output;
pub use broome_rank as rank;
pub use broome_rebalance as rebalance;
pub use broome_traits as traits;
pub use broome_universe as universe;

pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineOutput};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
