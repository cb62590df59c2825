//! Snapshot preparation from price history.
//!
//! The pipeline consumes one row per security with `ret_20` and `adv_20`
//! already in place. When the host supplies a raw history frame instead,
//! `latest_snapshot` derives the two window-aggregate columns and reduces to
//! the most recent observation per symbol. Fundamental columns riding along
//! in the history (market cap, ROE, FCF fields, exchange id) are carried
//! through untouched.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::FactorError;

use crate::liquidity::avg_dollar_volume::avg_dollar_volume_expr;
use crate::momentum::trailing_return::trailing_return_expr;

/// Window configuration for snapshot preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Trailing-return lookback in periods (default: 20).
    pub momentum_window: usize,
    /// Dollar-volume averaging window in observations (default: 20).
    pub volume_window: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            momentum_window: 20,
            volume_window: 20,
        }
    }
}

/// Derive `ret_20` and `adv_20` from a `(symbol, date, close, volume, ...)`
/// history frame and keep only the latest row per symbol.
///
/// Symbols with histories shorter than the configured windows get null
/// window columns and are screened out downstream rather than erroring.
pub fn latest_snapshot(history: LazyFrame, config: &PrepareConfig) -> Result<DataFrame, FactorError> {
    let snapshot = history
        .sort(["symbol", "date"], Default::default())
        .with_columns([
            trailing_return_expr(config.momentum_window),
            avg_dollar_volume_expr(config.volume_window, config.volume_window),
        ])
        .filter(col("date").eq(col("date").max().over([col("symbol")])))
        .collect()?;

    Ok(snapshot)
}
