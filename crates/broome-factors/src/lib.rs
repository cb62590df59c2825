#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod liquidity;
pub mod momentum;
pub mod prepare;
pub mod quality;
pub mod registry;
pub mod value;

// Re-export common types
pub use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

// Re-export registry types for convenience
pub use registry::{FactorCategory, FactorInfo, available_factors, get_factor_info, ranked_factors};
