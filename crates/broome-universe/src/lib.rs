#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/broome/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod filter;
pub mod mask;
pub mod screens;

pub use filter::{UniverseConfig, compute_mask, compute_mask_with_screens};
pub use mask::UniverseMask;
pub use screens::Screen;
