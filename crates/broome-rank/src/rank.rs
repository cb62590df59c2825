//! Within-universe average-tie ranking.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use broome_universe::UniverseMask;

use crate::table::RankColumn;

/// Rank raw values within the universe mask, higher value = higher rank.
///
/// Participants are the symbols that are in `mask` and carry a finite,
/// non-null value; everyone else is absent from the result. Ranks run from 1
/// (lowest raw value) to the participant count (highest). Tied raw values
/// receive the arithmetic mean of the ordinal positions they jointly occupy:
/// a three-way tie spanning ordinals 5, 6 and 7 ranks all three at 6.0. The
/// tie average is computed exactly, not approximated.
pub fn average_rank(values: &[(String, Option<f64>)], mask: &UniverseMask) -> RankColumn {
    let mut participants: Vec<(&str, f64)> = values
        .iter()
        .filter(|(symbol, _)| mask.contains(symbol))
        .filter_map(|(symbol, value)| {
            value
                .filter(|v| v.is_finite())
                .map(|v| (symbol.as_str(), v))
        })
        .collect();

    // Ascending by value; symbol breaks exact ties so the walk below is
    // deterministic (the averaged rank is the same either way).
    participants.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut ranks = BTreeMap::new();
    let mut i = 0;
    while i < participants.len() {
        let mut j = i;
        while j + 1 < participants.len() && participants[j + 1].1 == participants[i].1 {
            j += 1;
        }
        // Ordinal positions are 1-based: this run occupies i+1 ..= j+1 and
        // every member gets their mean.
        let rank = (i + j + 2) as f64 / 2.0;
        for &(symbol, _) in &participants[i..=j] {
            ranks.insert(symbol.to_string(), rank);
        }
        i = j + 1;
    }

    RankColumn::from_map(ranks)
}
