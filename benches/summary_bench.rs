use std::hint::black_box;
use std::time::Duration;

use codec_bench::{EncodeMetrics, EncodeResult, ResultSet, render_summary};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn synthetic_results(codecs: usize) -> ResultSet {
    let mut results = ResultSet::new();
    for index in 0..codecs {
        let name = format!("codec{index}");
        if index % 5 == 4 {
            results.insert(
                name,
                EncodeResult::Failure {
                    error: "Unknown encoder\n".repeat(8),
                },
            );
        } else {
            let seconds = 1.0 + (index % 7) as f64 * 0.5;
            let output_bytes = 1_000_000 + (index as u64 % 11) * 250_000;
            results.insert(
                name,
                EncodeResult::Success(EncodeMetrics::new(seconds, 50_000_000, output_bytes)),
            );
        }
    }
    results
}

fn report_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(1));

    for codecs in [3usize, 32, 256] {
        let results = synthetic_results(codecs);
        group.bench_with_input(
            BenchmarkId::new("render_summary", codecs),
            &results,
            |b, results| {
                b.iter(|| black_box(render_summary(results)));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("to_json_pretty", codecs),
            &results,
            |b, results| {
                b.iter(|| {
                    results
                        .to_report()
                        .to_json_pretty()
                        .expect("report should serialize in benchmark")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, report_benchmark);
criterion_main!(benches);
