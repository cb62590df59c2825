//! Universe filter: snapshot frame in, mask out.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::mask::UniverseMask;
use crate::screens::Screen;

/// Thresholds for the default liquidity universe.
///
/// Defaults replicate the minimum-liquidity, no-OTC universe: market cap
/// above $50M, price above $1, 20-day average dollar volume above $200K,
/// exchange identifier not starting with "OTC".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Exclusive minimum market capitalization.
    pub min_market_cap: f64,
    /// Exclusive minimum closing price.
    pub min_price: f64,
    /// Exclusive minimum 20-day average dollar volume.
    pub min_dollar_volume: f64,
    /// Exchange-identifier prefix that disqualifies a record.
    pub exclude_exchange_prefix: String,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            min_market_cap: 50_000_000.0,
            min_price: 1.0,
            min_dollar_volume: 200_000.0,
            exclude_exchange_prefix: "OTC".to_string(),
        }
    }
}

impl UniverseConfig {
    /// Expand the config into its screen set.
    pub fn screens(&self) -> Vec<Screen> {
        vec![
            Screen::Threshold {
                column: "market_cap".to_string(),
                min: self.min_market_cap,
            },
            Screen::Threshold {
                column: "close".to_string(),
                min: self.min_price,
            },
            Screen::Threshold {
                column: "adv_20".to_string(),
                min: self.min_dollar_volume,
            },
            Screen::PrefixExclude {
                column: "exchange_id".to_string(),
                prefix: self.exclude_exchange_prefix.clone(),
            },
        ]
    }
}

/// Compute the universe mask for a snapshot frame.
///
/// Screens are AND-combined. A record failing any screen, or missing any
/// screened field, is excluded. A frame without a usable `symbol` column
/// yields the empty mask.
pub fn compute_mask(snapshot: &DataFrame, config: &UniverseConfig) -> UniverseMask {
    compute_mask_with_screens(snapshot, &config.screens())
}

/// Compute a mask from an explicit screen set.
pub fn compute_mask_with_screens(snapshot: &DataFrame, screens: &[Screen]) -> UniverseMask {
    let Some(symbols) = text_column(snapshot, "symbol") else {
        return UniverseMask::new();
    };

    // Resolve each screen's column once, up front. An absent column stays
    // None and fails the screen for every record.
    let resolved: Vec<ResolvedScreen<'_>> = screens
        .iter()
        .map(|screen| {
            let (numeric, text) = match screen {
                Screen::Threshold { column, .. } => (numeric_column(snapshot, column), None),
                Screen::PrefixExclude { column, .. } => (None, text_column(snapshot, column)),
            };
            ResolvedScreen {
                screen,
                numeric,
                text,
            }
        })
        .collect();

    let mut mask = UniverseMask::new();
    'records: for (i, symbol) in symbols.iter().enumerate() {
        let Some(symbol) = symbol else {
            continue;
        };
        for screen in &resolved {
            if !screen.passes(i) {
                continue 'records;
            }
        }
        mask.insert(symbol.clone());
    }
    mask
}

struct ResolvedScreen<'a> {
    screen: &'a Screen,
    numeric: Option<Vec<Option<f64>>>,
    text: Option<Vec<Option<String>>>,
}

impl ResolvedScreen<'_> {
    fn passes(&self, i: usize) -> bool {
        let numeric = self.numeric.as_ref().and_then(|v| v.get(i).copied().flatten());
        let text = self
            .text
            .as_ref()
            .and_then(|v| v.get(i).and_then(|o| o.as_deref()));
        self.screen.passes(numeric, text)
    }
}

/// Extract a column as `f64` values, or `None` if absent or uncastable.
fn numeric_column(df: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    let column = df.column(name).ok()?.cast(&DataType::Float64).ok()?;
    let values = column.f64().ok()?;
    Some((0..values.len()).map(|i| values.get(i)).collect())
}

/// Extract a column as string values, or `None` if absent or non-string.
fn text_column(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let values = column.str().ok()?;
    Some(
        (0..values.len())
            .map(|i| values.get(i).map(str::to_string))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> DataFrame {
        DataFrame::new(vec![
            Series::new("symbol".into(), vec!["AAA", "BBB", "CCC", "DDD", "EEE"]).into(),
            Series::new(
                "market_cap".into(),
                vec![
                    Some(60_000_000.0),
                    Some(40_000_000.0),
                    Some(900_000_000.0),
                    None,
                    Some(75_000_000.0),
                ],
            )
            .into(),
            Series::new(
                "close".into(),
                vec![Some(12.0), Some(8.0), Some(0.5), Some(30.0), Some(5.0)],
            )
            .into(),
            Series::new(
                "adv_20".into(),
                vec![
                    Some(500_000.0),
                    Some(450_000.0),
                    Some(900_000.0),
                    Some(600_000.0),
                    Some(320_000.0),
                ],
            )
            .into(),
            Series::new(
                "exchange_id".into(),
                vec![
                    Some("NYSE"),
                    Some("NAS"),
                    Some("NYSE"),
                    Some("NYSE"),
                    Some("OTCPK"),
                ],
            )
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_mask() {
        // BBB fails market cap, CCC fails price, DDD has a null market cap,
        // EEE is OTC. Only AAA survives every screen.
        let mask = compute_mask(&snapshot(), &UniverseConfig::default());
        assert_eq!(mask.len(), 1);
        assert!(mask.contains("AAA"));
    }

    #[test]
    fn test_missing_screen_column_yields_empty_mask() {
        let df = DataFrame::new(vec![
            Series::new("symbol".into(), vec!["AAA"]).into(),
            Series::new("close".into(), vec![10.0]).into(),
        ])
        .unwrap();
        let mask = compute_mask(&df, &UniverseConfig::default());
        assert!(mask.is_empty());
    }

    #[test]
    fn test_missing_symbol_column_yields_empty_mask() {
        let df = DataFrame::new(vec![Series::new("close".into(), vec![10.0]).into()]).unwrap();
        let mask = compute_mask(&df, &UniverseConfig::default());
        assert!(mask.is_empty());
    }

    #[test]
    fn test_mask_monotonicity() {
        // Tightening any threshold never increases the mask size.
        let df = snapshot();
        let loose = UniverseConfig {
            min_market_cap: 0.0,
            min_price: 0.0,
            min_dollar_volume: 0.0,
            exclude_exchange_prefix: "OTC".to_string(),
        };
        let mut tight = loose.clone();
        tight.min_market_cap = 50_000_000.0;

        let loose_mask = compute_mask(&df, &loose);
        let tight_mask = compute_mask(&df, &tight);
        assert!(tight_mask.len() <= loose_mask.len());
        for symbol in tight_mask.symbols() {
            assert!(loose_mask.contains(symbol));
        }
    }

    #[test]
    fn test_single_screen() {
        let screens = vec![Screen::Threshold {
            column: "close".to_string(),
            min: 1.0,
        }];
        let mask = compute_mask_with_screens(&snapshot(), &screens);
        assert_eq!(mask.len(), 4);
        assert!(!mask.contains("CCC"));
    }
}
