//! CSV input loading for the CLI.
//!
//! The host scheduler hands the engine a snapshot CSV (one row per security)
//! and a positions CSV (current book weights, optional tradability flag).
//! Empty fields deserialize to nulls and flow through the pipeline's
//! missing-data handling instead of failing the load.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use broome_rebalance::PositionsSnapshot;

/// Errors loading CLI input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Frame assembly error.
    #[error("frame assembly error: {0}")]
    Frame(#[from] PolarsError),
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    symbol: String,
    market_cap: Option<f64>,
    close: Option<f64>,
    adv_20: Option<f64>,
    exchange_id: Option<String>,
    roe: Option<f64>,
    fcf_yield: Option<f64>,
    fcf_per_share: Option<f64>,
    ret_20: Option<f64>,
}

/// Load a snapshot frame from a CSV with columns `symbol`, `market_cap`,
/// `close`, `adv_20`, `exchange_id`, `roe`, `fcf_yield`, `fcf_per_share`,
/// `ret_20`.
pub fn snapshot_from_csv(path: &Path) -> Result<DataFrame, InputError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows: Vec<SnapshotRow> = reader
        .deserialize()
        .collect::<Result<_, csv::Error>>()?;

    let frame = DataFrame::new(vec![
        Series::new(
            "symbol".into(),
            rows.iter().map(|r| r.symbol.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "market_cap".into(),
            rows.iter().map(|r| r.market_cap).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "close".into(),
            rows.iter().map(|r| r.close).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "adv_20".into(),
            rows.iter().map(|r| r.adv_20).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "exchange_id".into(),
            rows.iter()
                .map(|r| r.exchange_id.clone())
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new("roe".into(), rows.iter().map(|r| r.roe).collect::<Vec<_>>()).into(),
        Series::new(
            "fcf_yield".into(),
            rows.iter().map(|r| r.fcf_yield).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "fcf_per_share".into(),
            rows.iter().map(|r| r.fcf_per_share).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "ret_20".into(),
            rows.iter().map(|r| r.ret_20).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(frame)
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    symbol: String,
    weight: f64,
    #[serde(default = "default_tradable")]
    tradable: bool,
}

fn default_tradable() -> bool {
    true
}

/// Current book weights plus the names flagged untradeable.
#[derive(Debug, Default)]
pub struct PositionsInput {
    /// Holdings as `(symbol, weight)`.
    pub positions: PositionsSnapshot,
    /// Symbols with `tradable = false` in the input.
    pub untradeable: BTreeSet<String>,
}

impl PositionsInput {
    /// Tradability predicate for the rebalance diff.
    pub fn tradable(&self, symbol: &str) -> bool {
        !self.untradeable.contains(symbol)
    }
}

/// Load the positions book from a CSV with columns `symbol`, `weight` and
/// an optional `tradable` flag (defaults to true when absent).
pub fn positions_from_csv(path: &Path) -> Result<PositionsInput, InputError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut weights = Vec::new();
    let mut untradeable = BTreeSet::new();
    for row in reader.deserialize() {
        let row: PositionRow = row?;
        if !row.tradable {
            untradeable.insert(row.symbol.clone());
        }
        weights.push((row.symbol, row.weight));
    }
    Ok(PositionsInput {
        positions: PositionsSnapshot::from_weights(weights),
        untradeable,
    })
}
