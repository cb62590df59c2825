//! Composite QVM scoring: rank of the sum of factor ranks.

use broome_universe::UniverseMask;

use crate::rank::average_rank;
use crate::table::RankColumn;

/// Combine quality, value and momentum ranks into the composite QVM rank.
///
/// The raw composite is the unweighted sum of the three factor ranks. A
/// symbol missing any one factor rank is excluded from the composite
/// entirely (null propagation, no imputation). The raw sum is then re-ranked
/// with the same average-tie rule, masked by the same universe.
///
/// The two stages are deliberate: factor columns can have different
/// participant counts when nulls differ per factor, so ranking the sum of
/// ranks is not the same as ranking a raw factor sum. Callers must not
/// collapse this into a single pass.
pub fn composite_rank(
    quality: &RankColumn,
    value: &RankColumn,
    momentum: &RankColumn,
    mask: &UniverseMask,
) -> RankColumn {
    let sums: Vec<(String, Option<f64>)> = mask
        .symbols()
        .map(|symbol| {
            let sum = match (
                quality.get(symbol),
                value.get(symbol),
                momentum.get(symbol),
            ) {
                (Some(q), Some(v), Some(m)) => Some(q + v + m),
                _ => None,
            };
            (symbol.to_string(), sum)
        })
        .collect();

    average_rank(&sums, mask)
}
