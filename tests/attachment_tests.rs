use squishy::{MeshConfig, ParticleId, PhysicsError, Vec2, World, WorldConfig};

fn pair(world: &mut World<f64>, gap: f64) -> (ParticleId, ParticleId) {
    let a = world.add_particle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();
    let b = world.add_particle(Vec2::new(gap, 0.0), 1.0, 1.0).unwrap();
    (a, b)
}

#[test]
fn attachment_is_mutual() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    let spring = world.attach_points(a, b).unwrap();

    let pa = world.particle(a).unwrap();
    let pb = world.particle(b).unwrap();
    assert_eq!(pa.attachment.map(|t| t.partner), Some(b));
    assert_eq!(pb.attachment.map(|t| t.partner), Some(a));
    assert!(pa.springs.iter().any(|s| s.id == spring && s.targets(b)));
    assert!(pb.springs.iter().any(|s| s.id == spring && s.targets(a)));
    assert_eq!(pa.springs[0].rest_distance, 10.0);
}

#[test]
fn detach_is_idempotent() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    world.attach_points(a, b).unwrap();

    world.detach_point(a).unwrap();
    world.detach_point(a).unwrap();
    world.detach_point(b).unwrap();

    for id in [a, b] {
        let p = world.particle(id).unwrap();
        assert!(p.attachment.is_none());
        assert!(p.springs.is_empty());
        assert_eq!(world.attachment_stress(id), Ok(0.0));
    }
}

#[test]
fn reattaching_releases_previous_partner() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    let c = world.add_particle(Vec2::new(0.0, 10.0), 1.0, 1.0).unwrap();

    world.attach_points(a, b).unwrap();
    world.attach_points(a, c).unwrap();

    let pb = world.particle(b).unwrap();
    assert!(pb.attachment.is_none());
    assert!(pb.springs.is_empty());
    assert_eq!(world.particle(a).unwrap().springs.len(), 1);
    assert_eq!(world.particle(a).unwrap().attachment.map(|t| t.partner), Some(c));
}

#[test]
fn stress_is_length_over_max() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    world.attach_points(a, b).unwrap();

    let stress = world.attachment_stress(a).unwrap();
    assert!((stress - 1.0 / 1.8).abs() < 1e-6);
    assert_eq!(world.attachment_stress(b), Ok(stress));
}

#[test]
fn stress_reads_less_connected_side() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let vein = world
        .generate_mesh(&MeshConfig::new(2, 0).with_init_scale(10.0).with_collision_group(1))
        .unwrap();
    let heart = world
        .generate_mesh(
            &MeshConfig::new(1, 1)
                .with_origin(100.0, 0.0)
                .with_init_scale(10.0)
                .with_collision_def(&["ox", "xx"]),
        )
        .unwrap();

    let slot = world.grid(heart).unwrap().vein_point(0).unwrap();
    assert_eq!(slot.position(), Vec2::new(100.0, 10.0));
    let slot = slot.particle;
    let end = world.grid(vein).unwrap().point(2, 0).unwrap().particle;
    world.attach_points(end, slot).unwrap();

    // stretch the vein's own last segment to twice its rest length
    world.particle_mut(end).unwrap().state.position = Vec2::new(30.0, 0.0);

    let stress = world.attachment_stress(slot).unwrap();
    assert!((stress - 20.0 / 18.0).abs() < 1e-5, "stress {stress}");
}

#[test]
fn overstressed_bond_tears() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    world.attach_points(a, b).unwrap();

    assert_eq!(world.tear_if_overstressed(a, 1.5), Ok(false));
    world.particle_mut(b).unwrap().state.position = Vec2::new(40.0, 0.0);
    assert_eq!(world.tear_if_overstressed(a, 1.5), Ok(true));
    assert!(world.particle(a).unwrap().attachment.is_none());
    assert!(world.particle(b).unwrap().attachment.is_none());
    assert_eq!(world.tear_if_overstressed(a, 1.5), Ok(false));
}

#[test]
fn bond_holds_particles_within_max_distance() {
    let mut world: World<f64> = World::new(WorldConfig::new());
    let (a, b) = pair(&mut world, 10.0);
    world.attach_points(a, b).unwrap();
    world.set_external_force(b, Vec2::new(1.0e5, 0.0)).unwrap();

    world.update(1.0 / 60.0);

    let gap = world.particle(a).unwrap().position().distance(world.particle(b).unwrap().position());
    assert!(gap <= 18.0 * (1.0 + 1e-4), "gap {gap}");
}

#[test]
fn bad_handles_are_reported() {
    let mut world = World::<f64>::new(WorldConfig::new());
    let (a, _) = pair(&mut world, 10.0);
    assert_eq!(world.attach_points(a, a), Err(PhysicsError::SelfAttachment));

    let mut other = World::<f64>::new(WorldConfig::new());
    for _ in 0..5 {
        other.add_particle(Vec2::zero(), 1.0, 0.0).unwrap();
    }
    let stranger = other.nearest_particle(Vec2::zero(), 1.0).unwrap();
    assert_eq!(
        world.attachment_stress(stranger),
        Err(PhysicsError::ParticleOutOfBounds { index: 4, count: 2 })
    );
}
