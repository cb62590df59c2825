//! Return on Equity (ROE) Factor
//!
//! The quality leg of the QVM composite. The snapshot already carries ROE as
//! a fundamental field, so this factor is a passthrough: the raw value goes
//! straight into the rank engine, which is where normalization happens in
//! this pipeline.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

/// Configuration for the Roe factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoeConfig {
    /// Snapshot column holding return on equity (default: "roe").
    pub source_column: String,
}

impl Default for RoeConfig {
    fn default() -> Self {
        Self {
            source_column: "roe".to_string(),
        }
    }
}

/// Roe passes the snapshot's return-on-equity field through as the quality
/// factor. Higher is better.
#[derive(Debug)]
pub struct RoeFactor {
    config: RoeConfig,
}

impl Factor for RoeFactor {
    fn name(&self) -> &str {
        "roe"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Ranked
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError> {
        let result = data.select([
            col("symbol"),
            col(self.config.source_column.as_str()).alias("roe"),
        ]);
        Ok(result)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "roe"]
    }
}

impl ConfiguredFactor for RoeFactor {
    type Config = RoeConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for RoeFactor {
    fn default() -> Self {
        Self::with_config(RoeConfig::default())
    }
}
