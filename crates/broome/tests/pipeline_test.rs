//! End-to-end pipeline tests: snapshot in, ranks, selection and
//! instructions out.

use polars::prelude::*;

use broome::rebalance::{Action, PositionsSnapshot};
use broome::Pipeline;

/// Snapshot rows: (symbol, market_cap, close, adv_20, exchange_id, roe,
/// fcf_yield, fcf_per_share, ret_20).
type Row<'a> = (&'a str, f64, f64, f64, &'a str, f64, f64, f64, f64);

fn snapshot(rows: &[Row<'_>]) -> DataFrame {
    DataFrame::new(vec![
        Series::new(
            "symbol".into(),
            rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "market_cap".into(),
            rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "close".into(),
            rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "adv_20".into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "exchange_id".into(),
            rows.iter().map(|r| r.4).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("roe".into(), rows.iter().map(|r| r.5).collect::<Vec<_>>()).into(),
        Series::new(
            "fcf_yield".into(),
            rows.iter().map(|r| r.6).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "fcf_per_share".into(),
            rows.iter().map(|r| r.7).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "ret_20".into(),
            rows.iter().map(|r| r.8).collect::<Vec<_>>(),
        )
        .into(),
    ])
    .unwrap()
}

/// Twelve screen-passing securities where every factor agrees on the
/// ordering: A01 best on all three legs, A12 worst.
fn twelve_aligned() -> DataFrame {
    let rows: Vec<Row<'static>> = (0..12)
        .map(|i| {
            let spread = 0.01 * (12 - i) as f64;
            (
                match i {
                    0 => "A01",
                    1 => "A02",
                    2 => "A03",
                    3 => "A04",
                    4 => "A05",
                    5 => "A06",
                    6 => "A07",
                    7 => "A08",
                    8 => "A09",
                    9 => "A10",
                    10 => "A11",
                    _ => "A12",
                },
                1e9,
                50.0,
                1e6,
                "NYSE",
                0.10 + spread,
                0.02 + spread,
                1.0,
                0.05 + spread,
            )
        })
        .collect();
    snapshot(&rows)
}

fn apply(
    outcome: &broome::rebalance::RebalanceOutcome,
    positions: &PositionsSnapshot,
) -> PositionsSnapshot {
    let mut applied: Vec<(String, f64)> = positions
        .iter()
        .map(|(s, w)| (s.to_string(), w))
        .collect();
    for inst in &outcome.instructions {
        match inst.action {
            Action::Open => applied.push((inst.symbol.clone(), inst.target_weight)),
            Action::Close => applied.retain(|(s, _)| s != &inst.symbol),
            Action::Hold => {}
        }
    }
    PositionsSnapshot::from_weights(applied)
}

#[test]
fn test_dominance_scenario_opens_top_ten_only() {
    let pipeline = Pipeline::default();
    let output = pipeline.run(&twelve_aligned()).unwrap();

    assert_eq!(output.mask.len(), 12);
    assert_eq!(output.longs.len(), 10);
    assert!(!output.longs.contains("A11"));
    assert!(!output.longs.contains("A12"));

    let outcome = pipeline.rebalance(&output.longs, &PositionsSnapshot::new(), |_| true);
    assert_eq!(outcome.num_opens(), 10);
    assert_eq!(outcome.num_closes(), 0);
    for inst in &outcome.instructions {
        assert_eq!(inst.action, Action::Open);
        assert_eq!(inst.target_weight, 0.1);
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let pipeline = Pipeline::default();
    let frame = twelve_aligned();

    let first = pipeline.run(&frame).unwrap();
    let second = pipeline.run(&frame).unwrap();
    assert_eq!(first.ranks, second.ranks);
    assert_eq!(first.longs, second.longs);
    assert_eq!(first.quantiles, second.quantiles);
    assert_eq!(first.frame, second.frame);

    let book = PositionsSnapshot::from_weights([("A01", 0.1), ("OLD", 0.1)]);
    let a = pipeline.rebalance(&first.longs, &book, |_| true);
    let b = pipeline.rebalance(&second.longs, &book, |_| true);
    assert_eq!(a.instructions, b.instructions);
}

#[test]
fn test_tied_quality_values_average_their_ordinals() {
    // BBB and CCC tie on ROE at ordinal positions 3 and 4 of 5.
    let frame = snapshot(&[
        ("AAA", 1e9, 50.0, 1e6, "NYSE", 0.01, 0.05, 1.0, 0.01),
        ("BBB", 1e9, 50.0, 1e6, "NYSE", 0.15, 0.04, 1.0, 0.02),
        ("CCC", 1e9, 50.0, 1e6, "NYSE", 0.15, 0.03, 1.0, 0.03),
        ("DDD", 1e9, 50.0, 1e6, "NYSE", 0.02, 0.02, 1.0, 0.04),
        ("EEE", 1e9, 50.0, 1e6, "NYSE", 0.30, 0.01, 1.0, 0.05),
    ]);
    let output = Pipeline::default().run(&frame).unwrap();

    assert_eq!(output.ranks.quality.get("BBB"), Some(3.5));
    assert_eq!(output.ranks.quality.get("CCC"), Some(3.5));
    assert_eq!(output.ranks.quality.get("EEE"), Some(5.0));
    assert_eq!(output.ranks.quality.get("AAA"), Some(1.0));
}

#[test]
fn test_screened_out_names_never_rank_or_select() {
    let frame = snapshot(&[
        ("GOOD", 1e9, 50.0, 1e6, "NYSE", 0.10, 0.02, 1.0, 0.05),
        // Fails the price floor.
        ("PENNY", 1e9, 0.50, 1e6, "NYSE", 0.90, 0.90, 1.0, 0.90),
        // Fails the exchange prefix screen.
        ("PINK", 1e9, 50.0, 1e6, "OTCBB", 0.90, 0.90, 1.0, 0.90),
    ]);
    let output = Pipeline::default().run(&frame).unwrap();

    assert_eq!(output.mask.len(), 1);
    assert!(output.mask.contains("GOOD"));
    assert_eq!(output.ranks.composite.get("PENNY"), None);
    assert_eq!(output.ranks.composite.get("PINK"), None);
    assert_eq!(
        output.longs.symbols().collect::<Vec<_>>(),
        vec!["GOOD"]
    );
    assert_eq!(output.frame.height(), 1);
}

#[test]
fn test_selection_is_subset_of_mask() {
    let output = Pipeline::default().run(&twelve_aligned()).unwrap();
    for symbol in output.longs.symbols() {
        assert!(output.mask.contains(symbol));
        assert!(output.ranks.composite.get(symbol).is_some());
    }
}

#[test]
fn test_short_universe_under_allocates_at_fixed_weight() {
    // Three participants, basket of ten: three opens at 0.1 each, no
    // renormalization toward full allocation.
    let frame = snapshot(&[
        ("AAA", 1e9, 50.0, 1e6, "NYSE", 0.10, 0.02, 1.0, 0.05),
        ("BBB", 1e9, 50.0, 1e6, "NYSE", 0.20, 0.03, 1.0, 0.06),
        ("CCC", 1e9, 50.0, 1e6, "NYSE", 0.30, 0.04, 1.0, 0.07),
    ]);
    let pipeline = Pipeline::default();
    let output = pipeline.run(&frame).unwrap();
    assert_eq!(output.longs.len(), 3);

    let outcome = pipeline.rebalance(&output.longs, &PositionsSnapshot::new(), |_| true);
    assert_eq!(outcome.num_opens(), 3);
    for inst in &outcome.instructions {
        assert_eq!(inst.target_weight, 0.1);
    }
}

#[test]
fn test_rebalance_converges_after_one_application() {
    let pipeline = Pipeline::default();
    let output = pipeline.run(&twelve_aligned()).unwrap();

    let book = PositionsSnapshot::from_weights([("A01", 0.1), ("STALE", 0.1)]);
    let first = pipeline.rebalance(&output.longs, &book, |_| true);
    assert!(first.num_opens() > 0);
    assert_eq!(first.num_closes(), 1);

    let converged = apply(&first, &book);
    let second = pipeline.rebalance(&output.longs, &converged, |_| true);
    assert_eq!(second.num_opens(), 0);
    assert_eq!(second.num_closes(), 0);
}

#[test]
fn test_untradeable_names_degrade_to_reporting() {
    let pipeline = Pipeline::default();
    let output = pipeline.run(&twelve_aligned()).unwrap();

    let book = PositionsSnapshot::from_weights([("HALTED", 0.1)]);
    let outcome = pipeline.rebalance(&output.longs, &book, |s| s != "A01" && s != "HALTED");

    assert_eq!(outcome.num_opens(), 9);
    assert_eq!(outcome.report.skipped_untradeable, vec!["A01"]);
    assert_eq!(outcome.report.held_untradeable, vec!["HALTED"]);
    assert_eq!(outcome.num_closes(), 0);
}

#[test]
fn test_history_input_prepares_window_columns() {
    // Two symbols with 25 observations each, enough for the default
    // 20-period momentum and volume windows. AAA trends up, BBB down.
    let days = 25usize;
    let mut symbols: Vec<&str> = Vec::new();
    let mut dates: Vec<i64> = Vec::new();
    let mut closes: Vec<f64> = Vec::new();
    for (symbol, base, step) in [("AAA", 10.0, 0.1), ("BBB", 50.0, -0.2)] {
        for day in 0..days {
            symbols.push(symbol);
            dates.push(day as i64 + 1);
            closes.push(base + step * day as f64);
        }
    }
    let rows = symbols.len();
    let roes: Vec<f64> = symbols
        .iter()
        .map(|s| if *s == "AAA" { 0.2 } else { 0.1 })
        .collect();
    let history = DataFrame::new(vec![
        Series::new("symbol".into(), symbols).into(),
        Series::new("date".into(), dates).into(),
        Series::new("close".into(), closes).into(),
        Series::new("volume".into(), vec![1e5; rows]).into(),
        Series::new("market_cap".into(), vec![1e9; rows]).into(),
        Series::new("exchange_id".into(), vec!["NYSE"; rows]).into(),
        Series::new("roe".into(), roes).into(),
        Series::new("fcf_yield".into(), vec![0.02; rows]).into(),
        Series::new("fcf_per_share".into(), vec![1.0; rows]).into(),
    ])
    .unwrap();

    let pipeline = Pipeline::default();
    let output = pipeline.run_history(history.lazy()).unwrap();

    // AAA rose, BBB fell; both still rank because momentum is relative.
    assert_eq!(output.mask.len(), 2);
    assert!(
        output.ranks.momentum.get("AAA").unwrap() > output.ranks.momentum.get("BBB").unwrap()
    );
}

#[test]
fn test_quantiles_cover_all_participants() {
    let output = Pipeline::default().run(&twelve_aligned()).unwrap();
    assert_eq!(output.quantiles.len(), 12);
    // Best composite name sits in the top decile, worst in the bottom.
    assert_eq!(output.quantiles.get("A01"), Some(&9));
    assert_eq!(output.quantiles.get("A12"), Some(&0));
}
