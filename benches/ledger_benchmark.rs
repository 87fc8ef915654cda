use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use gold_desk::alerts::LogNotifier;
use gold_desk::desk::Desk;
use gold_desk::ledger::PortfolioLedger;
use gold_desk::logging;
use gold_desk::model::{Currency, WeightUnit};
use gold_desk::simulator::{SimulatorConfig, StdRandom};

fn bench_fifo_liquidation(c: &mut Criterion) {
    let lot_count: usize = 10_000;

    let mut group = c.benchmark_group("fifo_liquidation");
    group.throughput(Throughput::Elements(lot_count as u64));

    group.bench_function("reduce_by_quantity", |b| {
        b.iter_batched(
            || {
                let mut ledger = PortfolioLedger::new();
                for i in 0..lot_count {
                    let _ = ledger.add_lot(1.0 + (i % 7) as f64, 90.0 + (i % 13) as f64);
                }
                ledger
            },
            |mut ledger| {
                let sold = ledger.reduce_by_quantity(black_box(15_000.0));
                black_box(sold)
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_desk_ticks(c: &mut Criterion) {
    logging::set_silent(true);
    let mut desk = Desk::new(
        SimulatorConfig::default(),
        Box::new(StdRandom::seeded(0xBADF00D)),
        Box::new(LogNotifier),
    );
    for step in 0..100 {
        let _ = desk.add_alert(
            2_400.0 + step as f64,
            Currency::Usd,
            WeightUnit::TroyOunce,
        );
    }

    c.bench_function("desk_advance", |b| {
        b.iter(|| black_box(desk.advance()));
    });
}

criterion_group!(benches, bench_fifo_liquidation, bench_desk_ticks);
criterion_main!(benches);
