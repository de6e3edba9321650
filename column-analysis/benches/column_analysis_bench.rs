use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use column_analysis::analyzers::{
    AnalysisKind, AnalysisRunner, ColumnAnalysis, ColumnAnalyzer, ColumnIter,
    DistributionAnalyzer, SpreadAnalyzer, StatisticsAnalyzer,
};

const LABELS: [&str; 4] = ["setosa", "versicolor", "virginica", "unknown"];

/// Rows of `[category, flag, measurement, label]`, deterministic per `n`.
fn generate_rows(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| {
            let measurement = ((i * 7919) % 1000) as f64 / 10.0;
            vec![
                format!("cat{}", (i * 31) % 250),
                (i % 2).to_string(),
                format!("{measurement:.1}"),
                LABELS[i % LABELS.len()].to_string(),
            ]
        })
        .collect()
}

fn benchmark_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");

    for n in [1_000, 10_000, 100_000] {
        let rows = generate_rows(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("distribution", n), &rows, |b, rows| {
            let analyzer = DistributionAnalyzer::new();
            b.iter(|| analyzer.analyze(ColumnIter::new(std::hint::black_box(rows), 3, 0).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("spread_discrete", n), &rows, |b, rows| {
            let analyzer = SpreadAnalyzer::new();
            b.iter(|| analyzer.analyze(ColumnIter::new(std::hint::black_box(rows), 3, 1).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("spread_continuous", n), &rows, |b, rows| {
            let analyzer = SpreadAnalyzer::new();
            b.iter(|| analyzer.analyze(ColumnIter::new(std::hint::black_box(rows), 3, 2).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("statistics", n), &rows, |b, rows| {
            let analyzer = StatisticsAnalyzer::new();
            b.iter(|| analyzer.analyze(ColumnIter::new(std::hint::black_box(rows), 3, 2).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_runner(c: &mut Criterion) {
    let rows = generate_rows(10_000);
    let mut runner = AnalysisRunner::new(3);
    for column in 0..3 {
        for kind in AnalysisKind::ALL {
            runner = runner.add(ColumnAnalysis::from(kind), column, format!("column {column}"));
        }
    }

    c.bench_function("runner_all_analyses_10k", |b| {
        b.iter(|| runner.run(std::hint::black_box(&rows)).unwrap());
    });
}

criterion_group!(benches, benchmark_analyzers, benchmark_runner);
criterion_main!(benches);
