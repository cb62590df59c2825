//! One-cycle pipeline orchestration.
//!
//! `Pipeline::run` wires universe screening, factor computation, ranking,
//! composite scoring and selection into a single synchronous call over a
//! snapshot frame. Rebalancing against a positions book is a separate step
//! (`Pipeline::rebalance`) so hosts can run ranking and trading on different
//! cadences.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use broome_factors::prepare::{PrepareConfig, latest_snapshot};
use broome_factors::quality::RoeFactor;
use broome_factors::value::{FcfYieldFactor, ManualFcfYieldFactor};
use broome_rank::{
    RankColumn, RankError, RankTable, SelectionSet, average_rank, composite_rank, quantile_buckets,
    select_top,
};
use broome_rebalance::{PositionsSnapshot, RebalanceOutcome, diff};
use broome_traits::{Factor, FactorError};
use broome_universe::{UniverseConfig, UniverseMask, compute_mask};

/// Errors from a pipeline cycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A factor computation failed.
    #[error("factor computation failed: {0}")]
    Factor(#[from] FactorError),

    /// Ranking or bucketing failed.
    #[error("ranking failed: {0}")]
    Rank(#[from] RankError),

    /// Output frame assembly failed.
    #[error("frame assembly failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Configuration for one pipeline cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Universe screening thresholds.
    pub universe: UniverseConfig,
    /// Trailing-return lookback used when preparing snapshots from history.
    pub momentum_window: usize,
    /// Number of names in the long selection (default: 10).
    pub top_n: usize,
    /// Number of composite quantile buckets (default: 10).
    pub num_quantiles: usize,
    /// Target weight per selected name (default: 0.1).
    pub weight_per_name: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig::default(),
            momentum_window: 20,
            top_n: 10,
            num_quantiles: 10,
            weight_per_name: broome_rebalance::DEFAULT_WEIGHT_PER_NAME,
        }
    }
}

/// Everything one cycle produces, for the host to consume or inspect.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Symbols that passed the universe screens.
    pub mask: UniverseMask,
    /// Per-factor and composite rank columns.
    pub ranks: RankTable,
    /// The long selection: top `top_n` composite ranks.
    pub longs: SelectionSet,
    /// Composite quantile bucket per participant (bucket 0 = lowest ranks).
    pub quantiles: BTreeMap<String, usize>,
    /// Screened output frame, one row per mask member, with raw factor
    /// values, rank columns, the `qvm` composite and the `long_10` flag.
    pub frame: DataFrame,
}

/// The QVM ranking pipeline. Stateless between cycles.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Build a pipeline with the given configuration.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one cycle over a prepared snapshot frame.
    ///
    /// Degraded input degrades the output instead of failing: missing or
    /// null factor fields shrink the participant set, and an unusable frame
    /// produces an empty mask, empty ranks and an empty selection.
    pub fn run(&self, snapshot: &DataFrame) -> Result<PipelineOutput, PipelineError> {
        let mask = compute_mask(snapshot, &self.config.universe);

        let quality_values = ranked_factor_values(&RoeFactor::default(), snapshot)?;
        let value_values = ranked_factor_values(&FcfYieldFactor::default(), snapshot)?;
        let momentum_values = factor_values(snapshot, "ret_20")?;
        let manual_values = ranked_factor_values(&ManualFcfYieldFactor::default(), snapshot)?;

        let quality = average_rank(&quality_values, &mask);
        let value = average_rank(&value_values, &mask);
        let momentum = average_rank(&momentum_values, &mask);
        let composite = composite_rank(&quality, &value, &momentum, &mask);
        let ranks = RankTable {
            quality,
            value,
            momentum,
            composite,
        };

        let longs = select_top(&ranks.composite, self.config.top_n);
        let quantiles = quantile_buckets(&ranks.composite, self.config.num_quantiles)?;

        let frame = output_frame(
            snapshot,
            &mask,
            &ranks,
            &longs,
            &to_map(manual_values),
        )?;

        Ok(PipelineOutput {
            mask,
            ranks,
            longs,
            quantiles,
            frame,
        })
    }

    /// Prepare a snapshot from a `(symbol, date, close, volume, ...)`
    /// history frame, then run one cycle over it.
    pub fn run_history(&self, history: LazyFrame) -> Result<PipelineOutput, PipelineError> {
        let prepare = PrepareConfig {
            momentum_window: self.config.momentum_window,
            ..PrepareConfig::default()
        };
        let snapshot = latest_snapshot(history, &prepare)?;
        self.run(&snapshot)
    }

    /// Diff a cycle's long selection against the current positions book.
    pub fn rebalance<F>(
        &self,
        longs: &SelectionSet,
        positions: &PositionsSnapshot,
        tradable: F,
    ) -> RebalanceOutcome
    where
        F: Fn(&str) -> bool,
    {
        diff(longs, positions, self.config.weight_per_name, tradable)
    }
}

/// Extract `(symbol, value)` pairs for `column`, treating an absent column
/// or a null symbol as missing data rather than an error.
fn factor_values(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<(String, Option<f64>)>, PolarsError> {
    let Ok(symbols) = df.column("symbol") else {
        return Ok(Vec::new());
    };
    let symbols = symbols.str()?;

    let values = match df.column(column) {
        Ok(values) => Some(values.cast(&DataType::Float64)?),
        Err(_) => None,
    };
    let values = values.as_ref().map(|column| column.f64()).transpose()?;

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        if let Some(symbol) = symbols.get(i) {
            let value = values.and_then(|ca| ca.get(i));
            out.push((symbol.to_string(), value));
        }
    }
    Ok(out)
}

/// Run `factor` over the snapshot and extract its score column, or return no
/// values when the snapshot lacks one of the factor's required columns.
fn ranked_factor_values(
    factor: &impl Factor,
    snapshot: &DataFrame,
) -> Result<Vec<(String, Option<f64>)>, PipelineError> {
    for column in factor.required_columns() {
        if snapshot.column(column).is_err() {
            return Ok(Vec::new());
        }
    }
    let scores = factor.compute_scores(snapshot.clone().lazy())?.collect()?;
    Ok(factor_values(&scores, factor.name())?)
}

fn to_map(values: Vec<(String, Option<f64>)>) -> BTreeMap<String, f64> {
    values
        .into_iter()
        .filter_map(|(symbol, value)| value.map(|value| (symbol, value)))
        .collect()
}

fn output_frame(
    snapshot: &DataFrame,
    mask: &UniverseMask,
    ranks: &RankTable,
    longs: &SelectionSet,
    manual: &BTreeMap<String, f64>,
) -> Result<DataFrame, PipelineError> {
    let members: Vec<String> = mask.symbols().map(str::to_string).collect();

    let mktcap = to_map(factor_values(snapshot, "market_cap")?);
    let roe = to_map(factor_values(snapshot, "roe")?);
    let fcf_yield = to_map(factor_values(snapshot, "fcf_yield")?);
    let ret_20 = to_map(factor_values(snapshot, "ret_20")?);

    let raw = |map: &BTreeMap<String, f64>| -> Vec<Option<f64>> {
        members.iter().map(|s| map.get(s).copied()).collect()
    };
    let rank_col = |column: &RankColumn| -> Vec<Option<f64>> {
        members.iter().map(|s| column.get(s)).collect()
    };
    let long_flags: Vec<bool> = members.iter().map(|s| longs.contains(s)).collect();

    let frame = DataFrame::new(vec![
        Series::new("symbol".into(), members.clone()).into(),
        Series::new("mktcap".into(), raw(&mktcap)).into(),
        Series::new("roe".into(), raw(&roe)).into(),
        Series::new("fcf_yield".into(), raw(&fcf_yield)).into(),
        Series::new("fcf_yield_manual".into(), raw(manual)).into(),
        Series::new("ret_20".into(), raw(&ret_20)).into(),
        Series::new("quality".into(), rank_col(&ranks.quality)).into(),
        Series::new("value".into(), rank_col(&ranks.value)).into(),
        Series::new("momentum".into(), rank_col(&ranks.momentum)).into(),
        Series::new("qvm".into(), rank_col(&ranks.composite)).into(),
        Series::new("long_10".into(), long_flags).into(),
    ])?;
    Ok(frame)
}
