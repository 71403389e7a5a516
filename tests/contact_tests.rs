use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use squishy::{Vec2, World, WorldConfig};

const DT: f64 = 1.0 / 60.0;

#[test]
fn contact_impulses_are_equal_and_opposite() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let mut world: World<f64> = World::new(WorldConfig::new());
        let radius: f64 = rng.gen_range(0.5..5.0);
        let a_pos: Vec2<f64> = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let gap = rng.gen_range(0.05f64..1.95) * radius;
        let b_pos = a_pos + Vec2::new(angle.cos(), angle.sin()).scale(gap);

        let a = world.add_particle(a_pos, 1.0, radius).unwrap();
        let b = world.add_particle(b_pos, 1.0, radius).unwrap();
        let va: Vec2<f64> = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let vb: Vec2<f64> = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        world.particle_mut(a).unwrap().state.momentum = va;
        world.particle_mut(b).unwrap().state.momentum = vb;

        world.update(DT);

        let dva = world.particle(a).unwrap().velocity() - va;
        let dvb = world.particle(b).unwrap().velocity() - vb;
        let sum = dva + dvb;
        let tolerance = 1e-9 * (1.0 + dva.length());
        assert!(dva.length() > 0.0);
        assert!(
            sum.length() < tolerance,
            "dva ({}, {}) vs dvb ({}, {})",
            dva.x, dva.y, dvb.x, dvb.y,
        );
    }
}

#[test]
fn overlapping_pair_separates() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let a = world.add_particle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();
    let b = world.add_particle(Vec2::new(1.0, 0.0), 1.0, 1.0).unwrap();

    for _ in 0..30 {
        world.update(DT);
    }

    let gap = world.particle(a).unwrap().position().distance(world.particle(b).unwrap().position());
    assert!(gap > 1.0);
}

#[test]
fn coincident_particles_get_pushed_apart_along_x() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let a = world.add_particle(Vec2::new(3.0, 3.0), 1.0, 1.0).unwrap();
    let b = world.add_particle(Vec2::new(3.0, 3.0), 1.0, 1.0).unwrap();

    world.update(DT);

    let pa = world.particle(a).unwrap().position();
    let pb = world.particle(b).unwrap().position();
    assert!(pa.x.is_finite() && pb.x.is_finite());
    assert!(pa.x > pb.x);
    assert_eq!(pa.y, 3.0);
    assert_eq!(pb.y, 3.0);
}

#[test]
fn different_collision_groups_ignore_each_other() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let a = world.add_particle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();
    let b = world.add_particle(Vec2::new(0.5, 0.0), 1.0, 1.0).unwrap();
    world.particle_mut(b).unwrap().collision_group = 1;

    world.update(DT);

    assert_eq!(world.particle(a).unwrap().position(), Vec2::new(0.0, 0.0));
    assert_eq!(world.particle(b).unwrap().position(), Vec2::new(0.5, 0.0));
}
