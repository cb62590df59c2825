//! Selection-versus-positions diffing.

use serde::{Deserialize, Serialize};

use broome_rank::SelectionSet;

use crate::instruction::RebalanceInstruction;
use crate::positions::PositionsSnapshot;

/// Everything the diff deliberately did not trade, surfaced for the host.
///
/// None of these are errors: untradeable names and already-correct positions
/// degrade to reporting, never to a failed cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebalanceReport {
    /// Selected names opened (or re-targeted) this cycle.
    pub opened: Vec<String>,
    /// Held names closed this cycle.
    pub closed: Vec<String>,
    /// Selected names already held at the exact target weight; no
    /// instruction was issued.
    pub already_held: Vec<String>,
    /// Selected names skipped because they are currently untradeable.
    pub skipped_untradeable: Vec<String>,
    /// Held, unselected names left untouched because they are currently
    /// untradeable.
    pub held_untradeable: Vec<String>,
}

/// Instructions plus the report for one rebalance cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebalanceOutcome {
    /// Target-weight instructions, in selection order then positions order.
    pub instructions: Vec<RebalanceInstruction>,
    /// What was deliberately left alone.
    pub report: RebalanceReport,
}

impl RebalanceOutcome {
    /// Number of `Open` instructions.
    pub fn num_opens(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.action == crate::Action::Open)
            .count()
    }

    /// Number of `Close` instructions.
    pub fn num_closes(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.action == crate::Action::Close)
            .count()
    }
}

/// Diff the cycle's selection against current holdings.
///
/// For every selected name: if tradable and not already held at exactly
/// `weight_per_name`, emit an `Open` at `weight_per_name`; if already at
/// target, emit nothing (re-running a converged book is a no-op); if
/// untradeable, skip and report. For every held name not in the selection:
/// emit a `Close` if tradable, otherwise a `Hold` at the current weight plus
/// a report entry.
///
/// `weight_per_name` stays fixed even when the selection is shorter than
/// the configured basket; the resulting under-allocation is intended.
/// An empty selection or empty book makes the corresponding loop a no-op.
pub fn diff<F>(
    selection: &SelectionSet,
    positions: &PositionsSnapshot,
    weight_per_name: f64,
    tradable: F,
) -> RebalanceOutcome
where
    F: Fn(&str) -> bool,
{
    let mut outcome = RebalanceOutcome::default();

    for symbol in selection.symbols() {
        if !tradable(symbol) {
            outcome.report.skipped_untradeable.push(symbol.to_string());
            continue;
        }
        match positions.weight(symbol) {
            Some(current) if current == weight_per_name => {
                outcome.report.already_held.push(symbol.to_string());
            }
            _ => {
                outcome
                    .instructions
                    .push(RebalanceInstruction::open(symbol, weight_per_name));
                outcome.report.opened.push(symbol.to_string());
            }
        }
    }

    for (symbol, current) in positions.iter() {
        if selection.contains(symbol) {
            continue;
        }
        if tradable(symbol) {
            outcome.instructions.push(RebalanceInstruction::close(symbol));
            outcome.report.closed.push(symbol.to_string());
        } else {
            outcome
                .instructions
                .push(RebalanceInstruction::hold(symbol, current));
            outcome.report.held_untradeable.push(symbol.to_string());
        }
    }

    outcome
}
