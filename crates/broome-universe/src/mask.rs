//! Universe membership mask.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of symbols eligible for ranking and trading in one cycle.
///
/// The mask is recomputed every cycle and has no life beyond it. Iteration
/// order is ascending by symbol, which keeps downstream output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseMask {
    symbols: BTreeSet<String>,
}

impl UniverseMask {
    /// Create an empty mask.
    pub const fn new() -> Self {
        Self {
            symbols: BTreeSet::new(),
        }
    }

    /// Build a mask from an iterator of symbols.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a symbol to the mask.
    pub fn insert(&mut self, symbol: String) {
        self.symbols.insert(symbol);
    }

    /// Whether `symbol` is eligible.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of eligible symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the mask admits no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate eligible symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl FromIterator<String> for UniverseMask {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
