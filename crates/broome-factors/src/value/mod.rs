//! Value factors.

pub mod fcf_yield;
pub mod fcf_yield_manual;

pub use fcf_yield::{FcfYieldConfig, FcfYieldFactor};
pub use fcf_yield_manual::{ManualFcfYieldConfig, ManualFcfYieldFactor};
