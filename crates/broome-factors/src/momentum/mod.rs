//! Momentum factors.

pub mod trailing_return;

pub use trailing_return::{TrailingReturnConfig, TrailingReturnFactor};
