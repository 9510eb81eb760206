use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gpop_sim::base::SeededSource;
use gpop_sim::evolution::WrightFisher;
use gpop_sim::genealogy::{AncestryRetention, Genealogy};
use gpop_sim::simulation::{run_replicates, SimulationBuilder};
use std::hint::black_box;

fn bench_simulation_init(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_init");

    group.bench_function("biallelic_init", |b| {
        b.iter(|| {
            black_box(
                SimulationBuilder::new()
                    .population_size(black_box(1000))
                    .generations(black_box(10))
                    .init_biallelic(0.5)
                    .seed(42)
                    .build()
                    .unwrap(),
            );
        })
    });

    group.finish();
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for &pop_size in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(pop_size as u64));
        group.bench_with_input(
            BenchmarkId::new("step_mutating", pop_size),
            &pop_size,
            |b, &size| {
                b.iter_batched(
                    || {
                        SimulationBuilder::new()
                            .population_size(size)
                            .generations(10)
                            .mutation_rate(0.01)
                            .demes(10)
                            .seed(42)
                            .build()
                            .unwrap()
                    },
                    |mut sim| {
                        sim.step().unwrap();
                        black_box(sim)
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_coalescent_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("coalescent_run");

    for &pop_size in &[10usize, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("until_coalescence", pop_size),
            &pop_size,
            |b, &size| {
                b.iter_batched(
                    || {
                        SimulationBuilder::new()
                            .population_size(size)
                            .generations(100_000)
                            .stop_at_coalescence()
                            .seed(7)
                            .build()
                            .unwrap()
                    },
                    |mut sim| black_box(sim.run().unwrap()),
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_common_ancestor(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_ancestor");
    let size = 1_000;
    let mut rng = SeededSource::seed_from_u64(42);

    for &generations in &[10usize, 100, 1_000] {
        let mut genealogy = Genealogy::new(size, AncestryRetention::Full);
        for _ in 0..generations {
            genealogy.push_generation(&WrightFisher::new().draw_parents(size, &mut rng));
        }
        let group_ids: Vec<usize> = (0..size).step_by(100).collect();

        group.bench_with_input(
            BenchmarkId::new("ten_lineages", generations),
            &genealogy,
            |b, genealogy| b.iter(|| black_box(genealogy.last_common_ancestor(&group_ids))),
        );
        group.bench_with_input(
            BenchmarkId::new("whole_population", generations),
            &genealogy,
            |b, genealogy| b.iter(|| black_box(genealogy.population_common_ancestor())),
        );
    }

    group.finish();
}

fn bench_replicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("replicates");
    group.sample_size(10);

    let config = SimulationBuilder::new()
        .population_size(100)
        .generations(100)
        .init_biallelic(0.5)
        .seed(1)
        .configuration()
        .unwrap();

    group.bench_function("drift_100x100", |b| {
        b.iter(|| black_box(run_replicates(&config, 100).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simulation_init,
    bench_simulation_step,
    bench_coalescent_run,
    bench_common_ancestor,
    bench_replicates
);
criterion_main!(benches);
