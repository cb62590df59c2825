//! Rank columns and the per-cycle rank table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One factor's ranks: symbol to rank in `[1, N]`, participants only.
///
/// Symbols outside the universe mask, or with a null/non-finite raw value,
/// are absent. Absence is the only representation of "unranked"; there is no
/// zero or sentinel rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankColumn {
    ranks: BTreeMap<String, f64>,
}

impl RankColumn {
    /// Wrap a symbol-to-rank map.
    pub const fn from_map(ranks: BTreeMap<String, f64>) -> Self {
        Self { ranks }
    }

    /// Rank of `symbol`, or `None` if it did not participate.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.ranks.get(symbol).copied()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether no symbol participated.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterate `(symbol, rank)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ranks.iter().map(|(s, r)| (s.as_str(), *r))
    }
}

/// All rank columns produced for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankTable {
    /// Quality factor ranks (return on equity).
    pub quality: RankColumn,
    /// Value factor ranks (free-cash-flow yield).
    pub value: RankColumn,
    /// Momentum factor ranks (trailing return).
    pub momentum: RankColumn,
    /// Composite QVM ranks: the re-ranked sum of the three factor ranks.
    pub composite: RankColumn,
}
