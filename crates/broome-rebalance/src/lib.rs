#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod diff;
pub mod instruction;
pub mod positions;

pub use diff::{RebalanceOutcome, RebalanceReport, diff};
pub use instruction::{Action, RebalanceInstruction};
pub use positions::PositionsSnapshot;

/// Equal weight for each of `k` names, not renormalized for short
/// selections.
pub const DEFAULT_WEIGHT_PER_NAME: f64 = 0.1;
