//! Top-K / bottom-K selection and quantile bucketing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::RankError;
use crate::table::RankColumn;

/// The symbols selected for the long basket in one cycle.
///
/// Always a subset of the composite rank's participants (and therefore of
/// the universe mask). Iteration order is ascending by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    symbols: BTreeSet<String>,
}

impl SelectionSet {
    /// Build a selection from an iterator of symbols.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `symbol` is selected.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of selected symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate selected symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// Participants ordered for selection: best rank first, ascending symbol as
/// the deterministic tie-break at equal ranks.
fn ordered_descending(ranks: &RankColumn) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = ranks.iter().collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    entries
}

/// Select the `k` highest-ranked symbols.
///
/// Returns fewer than `k` symbols only when fewer participate; the result
/// size is `min(k, participants)`. Boundary ties break by ascending symbol
/// so the selected set is reproducible.
pub fn select_top(ranks: &RankColumn, k: usize) -> SelectionSet {
    SelectionSet::from_symbols(
        ordered_descending(ranks)
            .into_iter()
            .take(k)
            .map(|(symbol, _)| symbol),
    )
}

/// Select the `k` lowest-ranked symbols, same tie-break rule as
/// [`select_top`].
pub fn select_bottom(ranks: &RankColumn, k: usize) -> SelectionSet {
    let mut entries: Vec<(&str, f64)> = ranks.iter().collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    SelectionSet::from_symbols(entries.into_iter().take(k).map(|(symbol, _)| symbol))
}

/// Assign every participant to one of `num_buckets` equal-population
/// buckets, ordered ascending by rank.
///
/// Bucket 0 holds the lowest ranks and bucket `num_buckets - 1` the highest;
/// bucket populations differ by at most one, and the highest-ranked
/// participant always lands in the top bucket. With fewer participants than
/// buckets, members spread out and some buckets stay empty.
pub fn quantile_buckets(
    ranks: &RankColumn,
    num_buckets: usize,
) -> Result<BTreeMap<String, usize>, RankError> {
    if num_buckets == 0 {
        return Err(RankError::InvalidBucketCount(num_buckets));
    }

    let mut entries: Vec<(&str, f64)> = ranks.iter().collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let n = entries.len();
    let mut buckets = BTreeMap::new();
    for (i, (symbol, _)) in entries.into_iter().enumerate() {
        // Position i (1-based i+1) of n maps to floor(((i+1)*B - 1) / n),
        // which fills buckets bottom-up with populations differing by at
        // most one and puts position n in bucket B-1.
        let bucket = ((i + 1) * num_buckets - 1) / n;
        buckets.insert(symbol.to_string(), bucket);
    }
    Ok(buckets)
}
