//! Whole-submission validation over generated filings.
#![allow(clippy::expect_used)]

use accval_bench::{SizeTier, generate_filings};
use accval_core::{DeadlineGateway, GatewayConfig, ValidationConfig, ValidationEngine};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_validation(c: &mut Criterion) {
    let engine = ValidationEngine::new(ValidationConfig::default()).expect("standard registries");
    let mut group = c.benchmark_group("validation");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let filings = generate_filings(&tier.config(42)).expect("generate filings");
        let submissions: usize = filings.iter().map(|f| f.submissions.len()).sum();
        group.throughput(Throughput::Elements(submissions as u64));

        group.bench_with_input(BenchmarkId::new("static", name), &filings, |b, filings| {
            b.iter(|| {
                for filing in filings {
                    for submission in &filing.submissions {
                        let errors = engine
                            .validate(submission, &filing.transaction, &filing.gateway)
                            .expect("validated");
                        assert!(errors.is_empty());
                    }
                }
            });
        });

        // Every gateway call runs on a helper thread under a deadline.
        let bounded: Vec<_> = filings
            .iter()
            .map(|f| DeadlineGateway::new(f.gateway.clone(), GatewayConfig::default()))
            .collect();
        group.bench_with_input(BenchmarkId::new("deadline", name), &filings, |b, filings| {
            b.iter(|| {
                for (filing, gateway) in filings.iter().zip(&bounded) {
                    for submission in &filing.submissions {
                        engine
                            .validate(submission, &filing.transaction, gateway)
                            .expect("validated");
                    }
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
