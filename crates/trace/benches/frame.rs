use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use scene::{RenderMode, Scene, ScenePatch};
use trace::{FrameContext, Ray, TraceOptions, TraceWorld, Tracer};

fn demo_world() -> TraceWorld {
    let mut scene = Scene::default();
    scene.apply(ScenePatch::ConeEnabled(true));
    scene.apply(ScenePatch::CuboidEnabled(true));
    TraceWorld::from_scene(&scene, &FrameContext::default())
}

fn rays(side: u32) -> Vec<Ray> {
    let origin = Vec3::new(0.0, 0.5, 6.0);
    let mut out = Vec::with_capacity((side * side) as usize);
    for y in 0..side {
        for x in 0..side {
            let u = (x as f32 + 0.5) / side as f32 * 2.0 - 1.0;
            let v = 1.0 - (y as f32 + 0.5) / side as f32 * 2.0;
            out.push(Ray::new(
                origin,
                Vec3::new(u * 0.6, v * 0.6, -1.0).normalize(),
            ));
        }
    }
    out
}

fn bench_analytic_frame(c: &mut Criterion) {
    let world = demo_world();
    let tracer = Tracer::new(&world, TraceOptions::for_mode(RenderMode::PathTrace, 2));
    let rays = rays(64);
    c.bench_function("analytic_64x64", |b| {
        b.iter(|| {
            for ray in &rays {
                std::hint::black_box(tracer.trace(ray));
            }
        });
    });
}

fn bench_marched_frame(c: &mut Criterion) {
    let world = demo_world();
    let tracer = Tracer::new(&world, TraceOptions::for_mode(RenderMode::RayMarch, 0));
    let rays = rays(32);
    c.bench_function("marched_32x32", |b| {
        b.iter(|| {
            for ray in &rays {
                std::hint::black_box(tracer.trace(ray));
            }
        });
    });
}

criterion_group!(benches, bench_analytic_frame, bench_marched_frame);
criterion_main!(benches);
