#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_bars;

use chrono::{Days, NaiveDate};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use overlay_ta::{
    Bar, Ema, EmaConfig, IndicatorConfig, IndicatorConfigBuilder, IndicatorInstance,
    IndicatorKind, Kdj, KdjConfig, Ma, MaConfig, Macd, MacdConfig, Ohlcv, PriceSeries, Registry,
    Rsi, RsiConfig, evaluate,
};
use std::{hint::black_box, time::Duration};

/// About ten years of sessions, built by replaying the fixture on fresh dates.
const SESSIONS: usize = 2_500;

fn long_series() -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2015, 1, 2).expect("valid date");
    let bars = load_bars();

    PriceSeries::try_from_bars(bars.iter().cycle().take(SESSIONS).zip(0u64..).map(
        |(bar, day)| {
            Bar::new(
                start + Days::new(day),
                bar.open(),
                bar.high(),
                bar.low(),
                bar.close(),
                bar.shares(),
            )
        },
    ))
    .expect("replayed fixture is well formed")
}

fn stream_benchmarks(c: &mut Criterion) {
    let series = long_series();
    let bars = series.bars();
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || <$ind_type>::new($config),
                    |mut ind| {
                        for bar in bars {
                            black_box(ind.compute(bar));
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    stream_bench!("ma5", Ma, MaConfig::default());
    stream_bench!("ma250", Ma, MaConfig::builder().period(250).build().unwrap());
    stream_bench!("ema12", Ema, EmaConfig::default());
    stream_bench!("macd", Macd, MacdConfig::default());
    stream_bench!("rsi14", Rsi, RsiConfig::default());
    stream_bench!("kdj9", Kdj, KdjConfig::default());
    stream_bench!("kdj250", Kdj, KdjConfig::builder().period(250).build().unwrap());

    group.finish();
}

fn tick_benchmarks(c: &mut Criterion) {
    let series = long_series();
    let mut group = c.benchmark_group("tick");
    group.sample_size(200);
    group.noise_threshold(0.03);
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    // Pre-feed all bars except the last, then benchmark a single compute() call.
    let (warmup, last) = series.bars().split_at(series.len() - 1);

    macro_rules! tick_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || {
                        let mut ind = <$ind_type>::new($config);
                        for bar in warmup {
                            ind.compute(bar);
                        }
                        ind
                    },
                    |mut ind| {
                        black_box(ind.compute(&last[0]));
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    tick_bench!("ma5", Ma, MaConfig::default());
    tick_bench!("ema12", Ema, EmaConfig::default());
    tick_bench!("macd", Macd, MacdConfig::default());
    tick_bench!("rsi14", Rsi, RsiConfig::default());
    tick_bench!("kdj9", Kdj, KdjConfig::default());
    tick_bench!("kdj250", Kdj, KdjConfig::builder().period(250).build().unwrap());

    group.finish();
}

fn evaluate_benchmarks(c: &mut Criterion) {
    let series = long_series();
    let registry: Registry = IndicatorKind::ALL
        .into_iter()
        .map(IndicatorInstance::with_defaults)
        .collect();

    let mut group = c.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(series.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("all_defaults", |b| {
        b.iter(|| black_box(evaluate(&series, &registry)));
    });

    group.bench_function("single_ma", |b| {
        let mut single = Registry::new();
        single.add_or_replace(IndicatorInstance::new(MaConfig::default()));
        b.iter(|| black_box(evaluate(&series, &single)));
    });

    group.finish();
}

criterion_group!(
    benches,
    stream_benchmarks,
    tick_benchmarks,
    evaluate_benchmarks
);
criterion_main!(benches);
