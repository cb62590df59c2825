//! Average Dollar Volume Factor
//!
//! Trailing mean of `close × volume` per symbol. This is a screening factor:
//! it feeds the universe filter's liquidity threshold and never enters the
//! composite score.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

/// Configuration for the AvgDollarVolume factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgDollarVolumeConfig {
    /// Rolling window in observations (default: 20).
    pub window: usize,
    /// Minimum observations before a value is produced (default: 20, i.e.
    /// a full window; shorter histories screen out rather than averaging a
    /// partial window).
    pub min_periods: usize,
}

impl Default for AvgDollarVolumeConfig {
    fn default() -> Self {
        Self {
            window: 20,
            min_periods: 20,
        }
    }
}

/// AvgDollarVolume computes the trailing average of close × volume.
///
/// As with the momentum factor, the output column name `adv_20` is the
/// snapshot schema contract and does not vary with the configured window.
#[derive(Debug)]
pub struct AvgDollarVolumeFactor {
    config: AvgDollarVolumeConfig,
}

/// Expression computing the rolling average dollar volume, grouped by
/// symbol. Callers must sort by symbol and date first.
pub(crate) fn avg_dollar_volume_expr(window: usize, min_periods: usize) -> Expr {
    (col("close") * col("volume"))
        .rolling_mean(RollingOptionsFixedWindow {
            window_size: window,
            min_periods,
            ..Default::default()
        })
        .over([col("symbol")])
        .alias("adv_20")
}

impl Factor for AvgDollarVolumeFactor {
    fn name(&self) -> &str {
        "adv_20"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Screening
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError> {
        let result = data
            .sort(["symbol", "date"], Default::default())
            .with_columns([avg_dollar_volume_expr(
                self.config.window,
                self.config.min_periods,
            )])
            .select([col("symbol"), col("date"), col("adv_20")]);

        Ok(result)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "date", "close", "volume"]
    }
}

impl ConfiguredFactor for AvgDollarVolumeFactor {
    type Config = AvgDollarVolumeConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for AvgDollarVolumeFactor {
    fn default() -> Self {
        Self::with_config(AvgDollarVolumeConfig::default())
    }
}
