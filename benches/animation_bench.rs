//! Benchmarks for the per-frame animation path.
#![allow(missing_docs, unused_results, clippy::unwrap_used)]

use std::fmt::Write;

use colony_anim::animation::{
    separators, GeneratorKind, PartitionTween, Scheduler, TransitTween,
};
use colony_anim::options::Options;
use colony_anim::scene::StepScene;
use colony_anim::util::color::Colorizer;
use colony_anim::util::easing::EasingFunction;
use colony_anim::world::{RawSnapshot, WorldSnapshot};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::EASE_OUT;
    c.bench_function("cubic_hermite_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))));
    });
}

fn separators_benchmark(c: &mut Criterion) {
    let quantities: Vec<f32> = (0..8).map(|i| (i * 37 % 11) as f32).collect();
    c.bench_function("separators_8_teams", |b| {
        b.iter(|| black_box(separators(black_box(&quantities))));
    });
}

fn scheduler_advance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_advance");
    for count in [10, 100, 1000] {
        let mut scheduler = Scheduler::new(EasingFunction::EASE_OUT);
        for i in 0..count {
            let _ = scheduler.register(
                GeneratorKind::NodeUpdate,
                PartitionTween::new(&[i as f32, 3.0, 1.0], &[1.0, 0.0, 5.0], 3.0),
            );
            let _ = scheduler.register(
                GeneratorKind::EdgeMovement,
                TransitTween::new(0.0, Some(1.0), 0.05),
            );
        }
        group.bench_function(format!("{count}_pairs"), |b| {
            b.iter(|| scheduler.advance(black_box(0.5)));
        });
    }
    group.finish();
}

/// Ring of `n` nodes, each edge carrying one transit group.
fn ring_world(n: u32, shift: f32) -> WorldSnapshot {
    let mut json = String::from(
        r##"{"teams":[{"id":1,"color":"#f00"},{"id":2,"color":"#00f"}],"nodes":["##,
    );
    for i in 0..n {
        let angle = i as f32 / n as f32 * std::f32::consts::TAU;
        let _ = write!(
            json,
            r#"{}{{"id":{i},"x":{},"y":{},"ants":[{{"team":1,"qt":{}}},{{"team":2,"qt":3}}]}}"#,
            if i == 0 { "" } else { "," },
            angle.cos() * 100.0,
            angle.sin() * 100.0,
            (i % 5) as f32 + shift,
        );
    }
    json.push_str(r#"],"edges":["#);
    for i in 0..n {
        let _ = write!(
            json,
            r#"{}{{"ids":[{i},{}],"groups":[{{"team":1,"qt":4,"progress":{}}}]}}"#,
            if i == 0 { "" } else { "," },
            (i + 1) % n,
            (shift * 0.5).min(1.0),
        );
    }
    json.push_str("]}");
    let raw: RawSnapshot = serde_json::from_str(&json).unwrap();
    WorldSnapshot::build(&raw).unwrap()
}

fn step_scene_benchmark(c: &mut Criterion) {
    let world = ring_world(200, 0.0).with_next(&ring_world(200, 1.0));
    let options = Options::default();
    let colorizer = Colorizer::default();

    c.bench_function("step_scene_build_200_nodes", |b| {
        b.iter(|| black_box(StepScene::build(&world, &options, &colorizer)));
    });

    let mut scene = StepScene::build(&world, &options, &colorizer);
    c.bench_function("step_scene_frame_200_nodes", |b| {
        b.iter(|| {
            scene.advance(black_box(0.5));
            black_box(scene.draw_list())
        });
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    separators_benchmark,
    scheduler_advance_benchmark,
    step_scene_benchmark
);
criterion_main!(benches);
