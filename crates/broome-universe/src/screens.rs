//! Composable universe screens.
//!
//! Each screen is an independent predicate over one snapshot column. New
//! screens are added as variants here without touching the filter loop.

use serde::{Deserialize, Serialize};

/// A single boolean screen over one snapshot column.
///
/// A record whose screened field is null or absent fails the screen; missing
/// data excludes, it never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Screen {
    /// Passes when the numeric column is strictly greater than `min`.
    Threshold {
        /// Snapshot column the screen reads.
        column: String,
        /// Exclusive lower bound.
        min: f64,
    },
    /// Passes when the string column does NOT start with `prefix`.
    ///
    /// This is a prefix match, not a substring or regex match.
    PrefixExclude {
        /// Snapshot column the screen reads.
        column: String,
        /// Prefix that disqualifies a record.
        prefix: String,
    },
}

impl Screen {
    /// Column this screen reads.
    pub fn column(&self) -> &str {
        match self {
            Self::Threshold { column, .. } | Self::PrefixExclude { column, .. } => column,
        }
    }

    /// Evaluate the screen against one record's field values.
    ///
    /// `numeric` is consulted by threshold screens, `text` by prefix screens;
    /// callers pass whichever the screened column holds. Non-finite numeric
    /// values fail threshold screens.
    pub fn passes(&self, numeric: Option<f64>, text: Option<&str>) -> bool {
        match self {
            Self::Threshold { min, .. } => numeric.is_some_and(|v| v.is_finite() && v > *min),
            Self::PrefixExclude { prefix, .. } => text.is_some_and(|t| !t.starts_with(prefix)),
        }
    }
}
