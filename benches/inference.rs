//! Inference benchmark: routine record → features → forest verdict.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lifepattern_ai::config::ForestConfig;
use lifepattern_ai::dataset;
use lifepattern_ai::model::AnomalyDetector;
use lifepattern_ai::routine::samples;
use lifepattern_ai::FeatureExtractor;

fn trained(n_trees: usize) -> AnomalyDetector {
    let data = dataset::generate(1000, 0.2, 42);
    let mut detector = AnomalyDetector::new(ForestConfig {
        n_trees,
        ..ForestConfig::default()
    });
    detector
        .train(&data.train_features, &data.train_labels)
        .unwrap();
    detector
}

fn bench_predict(c: &mut Criterion) {
    let detector = trained(100);
    let extractor = FeatureExtractor::new();
    let fv = extractor.transform(&samples::unhealthy()).unwrap();

    c.bench_function("predict_100_trees", |b| {
        b.iter(|| detector.predict(black_box(&fv)))
    });
}

fn bench_predict_by_forest_size(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    let fv = extractor.transform(&samples::healthy()).unwrap();

    let mut g = c.benchmark_group("predict_by_trees");
    for n in [10, 50, 100, 200] {
        let detector = trained(n);
        g.bench_function(format!("trees_{}", n).as_str(), |b| {
            b.iter(|| detector.predict(black_box(&fv)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_predict, bench_predict_by_forest_size);
criterion_main!(benches);
