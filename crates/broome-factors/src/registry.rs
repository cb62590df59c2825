//! Factor Registry
//!
//! Central metadata for the factors this engine knows about: which pipeline
//! role each one plays and which input columns it needs.

use broome_traits::FactorKind;

/// Available factor categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    /// Quality factors (return on equity).
    Quality,
    /// Value factors (FCF yield, manual FCF yield).
    Value,
    /// Momentum factors (trailing return).
    Momentum,
    /// Liquidity factors (average dollar volume).
    Liquidity,
}

/// Factor metadata.
#[derive(Debug, Clone)]
pub struct FactorInfo {
    /// Factor name (unique identifier and output column).
    pub name: &'static str,
    /// Factor category.
    pub category: FactorCategory,
    /// How the factor participates in the pipeline.
    pub kind: FactorKind,
    /// Brief description of what the factor measures.
    pub description: &'static str,
    /// Required column names in input data.
    pub required_columns: &'static [&'static str],
}

/// Get all available factor info.
pub fn available_factors() -> Vec<FactorInfo> {
    vec![
        FactorInfo {
            name: "roe",
            category: FactorCategory::Quality,
            kind: FactorKind::Ranked,
            description: "Return on equity - profitability quality",
            required_columns: &["symbol", "roe"],
        },
        FactorInfo {
            name: "fcf_yield",
            category: FactorCategory::Value,
            kind: FactorKind::Ranked,
            description: "Free-cash-flow yield from the data feed",
            required_columns: &["symbol", "fcf_yield"],
        },
        FactorInfo {
            name: "fcf_yield_manual",
            category: FactorCategory::Value,
            kind: FactorKind::Informational,
            description: "FCF per share over close, kept for calibration only",
            required_columns: &["symbol", "fcf_per_share", "close"],
        },
        FactorInfo {
            name: "ret_20",
            category: FactorCategory::Momentum,
            kind: FactorKind::Ranked,
            description: "Trailing 20-period cumulative return",
            required_columns: &["symbol", "date", "close"],
        },
        FactorInfo {
            name: "adv_20",
            category: FactorCategory::Liquidity,
            kind: FactorKind::Screening,
            description: "20-day average dollar volume universe screen",
            required_columns: &["symbol", "date", "close", "volume"],
        },
    ]
}

/// Get factor info by name.
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors().into_iter().find(|f| f.name == name)
}

/// Names of the factors that feed the composite rank, in composite order.
pub fn ranked_factors() -> Vec<&'static str> {
    available_factors()
        .into_iter()
        .filter(|f| f.kind == FactorKind::Ranked)
        .map(|f| f.name)
        .collect()
}
