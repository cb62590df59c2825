//! Manually derived FCF yield.
//!
//! FCF per share over closing price, kept side by side with the canonical
//! `fcf_yield` field for calibration against the feed. This factor is
//! [`FactorKind::Informational`]: it appears in pipeline output and nothing
//! else. It must never feed the rank or selection path; downstream
//! calibration tooling depends on the column being present.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

/// Configuration for the ManualFcfYield factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualFcfYieldConfig {
    /// Snapshot column holding FCF per share (default: "fcf_per_share").
    pub fcf_per_share_column: String,
    /// Snapshot column holding the closing price (default: "close").
    pub close_column: String,
}

impl Default for ManualFcfYieldConfig {
    fn default() -> Self {
        Self {
            fcf_per_share_column: "fcf_per_share".to_string(),
            close_column: "close".to_string(),
        }
    }
}

/// ManualFcfYield computes FCF per share divided by closing price.
#[derive(Debug)]
pub struct ManualFcfYieldFactor {
    config: ManualFcfYieldConfig,
}

impl Factor for ManualFcfYieldFactor {
    fn name(&self) -> &str {
        "fcf_yield_manual"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Informational
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError> {
        let fcf = col(self.config.fcf_per_share_column.as_str());
        let close = col(self.config.close_column.as_str());

        // A zero or negative close is unusable; propagate null instead of
        // an infinite ratio.
        let result = data
            .with_columns([when(close.clone().gt(0.0))
                .then(fcf / close)
                .otherwise(lit(NULL))
                .alias("fcf_yield_manual")])
            .select([col("symbol"), col("fcf_yield_manual")]);

        Ok(result)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "fcf_per_share", "close"]
    }
}

impl ConfiguredFactor for ManualFcfYieldFactor {
    type Config = ManualFcfYieldConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for ManualFcfYieldFactor {
    fn default() -> Self {
        Self::with_config(ManualFcfYieldConfig::default())
    }
}
