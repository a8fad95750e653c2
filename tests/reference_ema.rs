mod fixtures;

use fixtures::{assert_near, load_bars, load_ref_values};
use overlay_ta::{Ema, EmaConfig, IndicatorConfig, IndicatorConfigBuilder};

/// Tolerance: 1e-9.
/// The reference is the `ewm(span, adjust=False)` recursion seeded with the
/// first close, evaluated in exact arithmetic. The crate runs the same
/// recursion in f64, so only rounding separates the two.
const TOLERANCE: f64 = 1e-9;

fn check_ema(period: usize, path: &str) {
    let bars = load_bars();
    let reference = load_ref_values(path);
    assert_eq!(reference.len(), bars.len(), "EMA is defined on every session");

    let mut ema = Ema::new(EmaConfig::builder().period(period).build().unwrap());

    let mut ref_idx = 0;
    for bar in &bars {
        ema.compute(bar);

        if ref_idx < reference.len() && bar.date() == reference[ref_idx].date {
            let value = ema
                .value()
                .unwrap_or_else(|| panic!("EMA returned None on {}", bar.date()));
            assert_near(
                value,
                reference[ref_idx].expected,
                TOLERANCE,
                &format!("EMA({period}) at row {ref_idx} ({})", bar.date()),
            );
            ref_idx += 1;
        }
    }

    assert_eq!(
        ref_idx,
        reference.len(),
        "not all reference values checked: {ref_idx}/{}",
        reference.len()
    );
}

#[test]
fn ema_12_close_matches_reference() {
    check_ema(12, "tests/fixtures/data/ema-12-close.csv");
}

#[test]
fn ema_26_close_matches_reference() {
    check_ema(26, "tests/fixtures/data/ema-26-close.csv");
}
