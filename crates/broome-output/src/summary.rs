//! Human-readable rebalance reporting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use broome_rebalance::RebalanceOutcome;

/// One cycle's rebalance, summarized for operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSummary {
    /// Rebalance date.
    pub date: NaiveDate,
    /// Equal weight applied to each opened name.
    pub weight_per_name: f64,
    /// Names opened or re-targeted.
    pub opened: Vec<String>,
    /// Names closed.
    pub closed: Vec<String>,
    /// Selected names already at target.
    pub already_held: Vec<String>,
    /// Selected names skipped as untradeable.
    pub skipped_untradeable: Vec<String>,
    /// Held names left untouched as untradeable.
    pub held_untradeable: Vec<String>,
}

impl RebalanceSummary {
    /// Summarize a rebalance outcome.
    pub fn new(date: NaiveDate, weight_per_name: f64, outcome: &RebalanceOutcome) -> Self {
        Self {
            date,
            weight_per_name,
            opened: outcome.report.opened.clone(),
            closed: outcome.report.closed.clone(),
            already_held: outcome.report.already_held.clone(),
            skipped_untradeable: outcome.report.skipped_untradeable.clone(),
            held_untradeable: outcome.report.held_untradeable.clone(),
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nRebalance Summary: {}\n", self.date));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "  Weight per name:      {:.4}\n",
            self.weight_per_name
        ));
        output.push_str(&format!(
            "  Opened:               {:>4}  {}\n",
            self.opened.len(),
            self.opened.join(",")
        ));
        output.push_str(&format!(
            "  Closed:               {:>4}  {}\n",
            self.closed.len(),
            self.closed.join(",")
        ));
        output.push_str(&format!(
            "  Already at target:    {:>4}  {}\n",
            self.already_held.len(),
            self.already_held.join(",")
        ));
        if !self.skipped_untradeable.is_empty() {
            output.push_str(&format!(
                "  Skipped (untradeable):{:>4}  {}\n",
                self.skipped_untradeable.len(),
                self.skipped_untradeable.join(",")
            ));
        }
        if !self.held_untradeable.is_empty() {
            output.push_str(&format!(
                "  Held (untradeable):   {:>4}  {}\n",
                self.held_untradeable.len(),
                self.held_untradeable.join(",")
            ));
        }
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Rebalance Summary: {}\n\n", self.date));
        output.push_str(&format!(
            "**Weight per name:** {:.4}\n\n",
            self.weight_per_name
        ));
        output.push_str("| Outcome | Count | Names |\n");
        output.push_str("|---------|-------|-------|\n");
        output.push_str(&format!(
            "| Opened | {} | {} |\n",
            self.opened.len(),
            self.opened.join(", ")
        ));
        output.push_str(&format!(
            "| Closed | {} | {} |\n",
            self.closed.len(),
            self.closed.join(", ")
        ));
        output.push_str(&format!(
            "| Already at target | {} | {} |\n",
            self.already_held.len(),
            self.already_held.join(", ")
        ));
        output.push_str(&format!(
            "| Skipped untradeable | {} | {} |\n",
            self.skipped_untradeable.len(),
            self.skipped_untradeable.join(", ")
        ));
        output.push_str(&format!(
            "| Held untradeable | {} | {} |\n",
            self.held_untradeable.len(),
            self.held_untradeable.join(", ")
        ));

        output
    }
}

impl fmt::Display for RebalanceSummary {
    // One line of opens, one of closes, matching the cadence operators
    // expect from the rebalance log.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: opening {} positions worth {:.2} each in: {}",
            self.date,
            self.opened.len(),
            self.weight_per_name,
            self.opened.join(",")
        )?;
        write!(
            f,
            "{}: closing positions in: {}",
            self.date,
            self.closed.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broome_rebalance::{PositionsSnapshot, diff};
    use broome_rank::SelectionSet;

    fn outcome() -> RebalanceOutcome {
        let selection = SelectionSet::from_symbols(["AAA", "BBB"]);
        let positions = PositionsSnapshot::from_weights([("OLD", 0.1)]);
        diff(&selection, &positions, 0.1, |_| true)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 6, 25).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let summary = RebalanceSummary::new(date(), 0.1, &outcome());
        assert_eq!(summary.opened, vec!["AAA", "BBB"]);
        assert_eq!(summary.closed, vec!["OLD"]);
        assert!(summary.already_held.is_empty());
    }

    #[test]
    fn test_ascii_table() {
        let table = RebalanceSummary::new(date(), 0.1, &outcome()).to_ascii_table();
        assert!(table.contains("Rebalance Summary: 2018-06-25"));
        assert!(table.contains("AAA,BBB"));
        assert!(table.contains("OLD"));
    }

    #[test]
    fn test_markdown() {
        let md = RebalanceSummary::new(date(), 0.1, &outcome()).to_markdown();
        assert!(md.contains("# Rebalance Summary"));
        assert!(md.contains("| Opened | 2 |"));
    }

    #[test]
    fn test_display() {
        let text = RebalanceSummary::new(date(), 0.1, &outcome()).to_string();
        assert!(text.contains("opening"));
        assert!(text.contains("closing"));
    }
}
