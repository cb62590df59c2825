//! Quality factors.

pub mod roe;

pub use roe::{RoeConfig, RoeFactor};
