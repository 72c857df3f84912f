use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use verdant::{
    image::{Image, ImageSize},
    imgproc::parallel::ExecutionStrategy,
    AnalyzerConfig, VegetationAnalyzer,
};

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("VegetationAnalyzer");

    for (width, height) in [(640, 480), (1280, 960)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let size = ImageSize {
            width: *width,
            height: *height,
        };

        // green stripes over a brown background
        let data = (0..width * height)
            .flat_map(|i| {
                if (i % width) / 32 % 2 == 0 {
                    [40, 180, 60]
                } else {
                    [30, 70, 110]
                }
            })
            .collect();
        let image = Image::<u8, 3>::new(size, data).unwrap();

        for execution in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
            let analyzer = VegetationAnalyzer::new(AnalyzerConfig {
                execution,
                ..Default::default()
            })
            .unwrap();

            group.bench_with_input(
                BenchmarkId::new(format!("{execution:?}"), format!("{width}x{height}")),
                &image,
                |b, i| b.iter(|| analyzer.analyze_image(black_box(i), None).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_analyzer);
criterion_main!(benches);
