//! Trailing Return Factor
//!
//! The momentum leg of the QVM composite: cumulative return over a trailing
//! window, `close[t] / close[t - window] - 1`, computed per symbol over a
//! date-sorted price history. The first `window` observations of each symbol
//! have no lookback price and carry a null score.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use broome_traits::{ConfiguredFactor, Factor, FactorError, FactorKind};

/// Configuration for the TrailingReturn factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingReturnConfig {
    /// Lookback window in trading periods (default: 20).
    pub window: usize,
}

impl Default for TrailingReturnConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// TrailingReturn computes the trailing-window cumulative return per symbol.
///
/// The output column is named `ret_20` regardless of the configured window:
/// that name is the snapshot schema contract consumed by the pipeline and
/// reflects the default 20-period lookback.
#[derive(Debug)]
pub struct TrailingReturnFactor {
    config: TrailingReturnConfig,
}

/// Expression computing the trailing return over `window` periods, grouped
/// by symbol. Callers must sort by symbol and date first.
pub(crate) fn trailing_return_expr(window: usize) -> Expr {
    (col("close") / col("close").shift(lit(window as i64)).over([col("symbol")]) - lit(1.0))
        .alias("ret_20")
}

impl Factor for TrailingReturnFactor {
    fn name(&self) -> &str {
        "ret_20"
    }

    fn kind(&self) -> FactorKind {
        FactorKind::Ranked
    }

    fn compute_scores(&self, data: LazyFrame) -> Result<LazyFrame, FactorError> {
        let result = data
            .sort(["symbol", "date"], Default::default())
            .with_columns([trailing_return_expr(self.config.window)])
            .select([col("symbol"), col("date"), col("ret_20")]);

        Ok(result)
    }

    fn required_columns(&self) -> &[&str] {
        &["symbol", "date", "close"]
    }
}

impl ConfiguredFactor for TrailingReturnFactor {
    type Config = TrailingReturnConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl Default for TrailingReturnFactor {
    fn default() -> Self {
        Self::with_config(TrailingReturnConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factor_name_and_kind() {
        let factor = TrailingReturnFactor::default();
        assert_eq!(factor.name(), "ret_20");
        assert_eq!(factor.kind(), FactorKind::Ranked);
        assert_eq!(factor.config().window, 20);
    }

    #[test]
    fn test_trailing_return_per_symbol() {
        let factor = TrailingReturnFactor::with_config(TrailingReturnConfig { window: 2 });
        let df = DataFrame::new(vec![
            Series::new("symbol".into(), vec!["AAA", "AAA", "AAA", "AAA", "BBB", "BBB", "BBB"])
                .into(),
            Series::new("date".into(), vec![1i64, 2, 3, 4, 1, 2, 3]).into(),
            Series::new(
                "close".into(),
                vec![10.0, 11.0, 12.0, 13.0, 100.0, 90.0, 81.0],
            )
            .into(),
        ])
        .unwrap();

        let scores = factor
            .compute_scores(df.lazy())
            .unwrap()
            .collect()
            .unwrap();
        let ret = scores.column("ret_20").unwrap().f64().unwrap();

        // AAA rows: first two have no lookback, then 12/10-1 and 13/11-1.
        assert_eq!(ret.get(0), None);
        assert_eq!(ret.get(1), None);
        assert_relative_eq!(ret.get(2).unwrap(), 0.2);
        assert_relative_eq!(ret.get(3).unwrap(), 13.0 / 11.0 - 1.0);
        // BBB is windowed independently of AAA.
        assert_eq!(ret.get(4), None);
        assert_eq!(ret.get(5), None);
        assert_relative_eq!(ret.get(6).unwrap(), 81.0 / 100.0 - 1.0);
    }
}
