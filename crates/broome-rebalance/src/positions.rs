//! Read-only view of current holdings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current holdings as portfolio weights, keyed by symbol.
///
/// The snapshot is owned by the portfolio/broker collaborator; the engine
/// reads it and emits instructions, it never writes holdings itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionsSnapshot {
    weights: BTreeMap<String, f64>,
}

impl PositionsSnapshot {
    /// An empty book.
    pub const fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Build a snapshot from `(symbol, weight)` pairs.
    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights.into_iter().map(|(s, w)| (s.into(), w)).collect(),
        }
    }

    /// Current weight of `symbol`, or `None` if not held.
    pub fn weight(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    /// Whether `symbol` is currently held.
    pub fn holds(&self, symbol: &str) -> bool {
        self.weights.contains_key(symbol)
    }

    /// Number of open positions.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate `(symbol, weight)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }
}
