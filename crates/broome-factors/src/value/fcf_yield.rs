//! Free-Cash-Flow Yield Factor
//!
//! The value leg of the QVM composite: the feed's canonical FCF yield,
//! passed through raw. Higher yield = cheaper = more attractive, so the
//! "higher is better" rank convention holds without reorientation.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

/// Configuration for the FcfYield factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcfYieldConfig {
    /// Snapshot column holding the canonical FCF yield (default: "fcf_yield").
    pub source_column: String,
}

impl Default for FcfYieldConfig {
    fn default() -> Self {
        Self {
            source_column: "fcf_yield".to_string(),
        }
    }
}

/// FcfYield passes the snapshot's free-cash-flow yield through as the value
/// factor.
#[derive(Debug)]
pub struct FcfYieldFactor {
    config: FcfYieldConfig,
}

impl Factor for FcfYieldFactor {
    fn name(&self) -> &str {
        "fcf_yield"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Ranked
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError> {
        let result = data.select([
            col("symbol"),
            col(self.config.source_column.as_str()).alias("fcf_yield"),
        ]);
        Ok(result)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "fcf_yield"]
    }
}

impl ConfiguredFactor for FcfYieldFactor {
    type Config = FcfYieldConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for FcfYieldFactor {
    fn default() -> Self {
        Self::with_config(FcfYieldConfig::default())
    }
}
