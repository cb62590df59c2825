//! Rebalance instructions, the engine's sole output artifact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the execution collaborator should do with a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Establish or resize a position to the target weight.
    Open,
    /// Exit the position (target weight zero).
    Close,
    /// Leave the position at its current weight (emitted for held names the
    /// engine deliberately does not touch).
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Hold => "hold",
        };
        f.write_str(s)
    }
}

/// One target-weight instruction for the execution collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceInstruction {
    /// Security the instruction applies to.
    pub symbol: String,
    /// Portfolio weight to converge to.
    pub target_weight: f64,
    /// Instruction kind.
    pub action: Action,
}

impl RebalanceInstruction {
    /// An `Open` at `target_weight`.
    pub fn open(symbol: impl Into<String>, target_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight,
            action: Action::Open,
        }
    }

    /// A `Close` (target weight zero).
    pub fn close(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight: 0.0,
            action: Action::Close,
        }
    }

    /// A `Hold` at the position's current weight.
    pub fn hold(symbol: impl Into<String>, current_weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            target_weight: current_weight,
            action: Action::Hold,
        }
    }
}

impl fmt::Display for RebalanceInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {:.4}",
            self.action, self.symbol, self.target_weight
        )
    }
}
