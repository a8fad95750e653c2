mod fixtures;

use fixtures::{assert_near, load_bars, load_macd_ref};
use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, IndicatorParams, Macd, MacdConfig};

const REF_PATH: &str = "tests/fixtures/data/macd-12-26-9.csv";

/// Tolerance: 1e-9.
/// dif and dea are differences of `ewm(span, adjust=False)` lines computed
/// exactly; the histogram doubles the rounding of both.
const TOLERANCE: f64 = 1e-9;

#[test]
fn macd_12_26_9_close_matches_reference() {
    let bars = load_bars();
    let reference = load_macd_ref(REF_PATH);

    let config = MacdConfig::builder().fast(12).slow(26).signal(9).build().unwrap();
    let mut macd = Macd::new(config);

    let mut ref_idx = 0;
    for bar in &bars {
        macd.compute(bar);

        if ref_idx < reference.len() && bar.date() == reference[ref_idx].date {
            let value = macd
                .value()
                .unwrap_or_else(|| panic!("MACD returned None on {}", bar.date()));
            let ctx = format!("MACD(12, 26, 9) at row {ref_idx} ({})", bar.date());

            assert_near(value.dif(), reference[ref_idx].dif, TOLERANCE, &format!("{ctx} dif"));
            assert_near(value.dea(), reference[ref_idx].dea, TOLERANCE, &format!("{ctx} dea"));
            assert_near(
                value.histogram(),
                reference[ref_idx].histogram,
                TOLERANCE,
                &format!("{ctx} histogram"),
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
fn macd_overlay_is_reference_dif() {
    let bars = load_bars();
    let reference = load_macd_ref(REF_PATH);

    let line = IndicatorParams::from(MacdConfig::default()).overlay(&bars[..]);

    assert_eq!(line.len(), reference.len());
    for (i, row) in reference.iter().enumerate() {
        assert_near(
            line.get(i).unwrap(),
            row.dif,
            TOLERANCE,
            &format!("overlay on {}", row.date),
        );
    }
}
