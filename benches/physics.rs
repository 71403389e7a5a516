//! Benchmarks for squishy physics simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use squishy::*;

fn bench_single_spring(c: &mut Criterion) {
    c.bench_function("anchor_spring_1000_steps", |b| {
        b.iter(|| {
            let mut world: World<f32> = World::new(WorldConfig::new());
            let p = world.add_particle(Vec2::new(10.0, 5.0), 1.0, 1.0).unwrap();
            world
                .add_anchor_spring(p, Vec2::zero(), SpringParams::new(40.0, 0.5, 0.0).without_max_distance())
                .unwrap();
            for _ in 0..1000 {
                world.update(1.0 / 60.0);
            }
            world.particle(p).unwrap().position()
        });
    });
}

fn bench_vein_chain(c: &mut Criterion) {
    c.bench_function("vein_50_segments_60_steps", |b| {
        b.iter(|| {
            let mut world: World<f32> = World::new(WorldConfig::new());
            let vein = world
                .generate_mesh(&MeshConfig::new(50, 0).with_init_scale(25.0).with_collision_group(1))
                .unwrap();
            let head = world.grid(vein).unwrap().point(0, 0).unwrap().particle;
            let tail = world.grid(vein).unwrap().point(50, 0).unwrap().particle;
            world.affix_point(head, Vec2::zero()).unwrap();
            world.set_external_force(tail, Vec2::new(0.0, -200.0)).unwrap();
            for _ in 0..60 {
                world.update(1.0 / 60.0);
            }
            world.particle_count()
        });
    });
}

fn bench_organ_grid(c: &mut Criterion) {
    c.bench_function("organ_10x10_60_steps", |b| {
        b.iter(|| {
            let mut world: World<f32> = World::new(WorldConfig::new());
            world.set_play_area(Some(PlayArea::new(Vec2::new(250.0, 250.0), 400.0)));
            let organ = world
                .generate_mesh(&MeshConfig::new(10, 10).with_second_order_springs(true))
                .unwrap();
            world.set_pulse_modifier(organ, 1.1).unwrap();
            for _ in 0..60 {
                world.update(1.0 / 60.0);
            }
            world.grid(organ).unwrap().positions[0].position()
        });
    });
}

criterion_group!(benches, bench_single_spring, bench_vein_chain, bench_organ_grid);
criterion_main!(benches);
