#![cfg(feature = "serde")]

use squishy::{MeshConfig, PlayArea, Vec2, WorldConfig};

#[test]
fn world_config_round_trips_through_json() {
    let config: WorldConfig<f64> = WorldConfig::new()
        .with_relaxation_passes(8)
        .with_contact(2000.0, 0.2);
    let json = serde_json::to_string(&config).unwrap();
    let back: WorldConfig<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn mesh_config_keeps_collision_def() {
    let mesh: MeshConfig<f32> = MeshConfig::new(3, 4)
        .with_collision_group(2)
        .with_collision_def(&["xx  ", "xox ", "xxxx", " xox", "  xx"]);
    let json = serde_json::to_string(&mesh).unwrap();
    let back: MeshConfig<f32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mesh);
    assert_eq!(back.layout().unwrap().vein_slots.len(), 2);
}

#[test]
fn play_area_from_json() {
    let area: PlayArea<f64> =
        serde_json::from_str(r#"{"center":{"x":1.0,"y":2.0},"radius":300.0}"#).unwrap();
    assert_eq!(area, PlayArea::new(Vec2::new(1.0, 2.0), 300.0));
}
