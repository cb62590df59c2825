//! Liquidity factors.

pub mod avg_dollar_volume;

pub use avg_dollar_volume::{AvgDollarVolumeConfig, AvgDollarVolumeFactor};
