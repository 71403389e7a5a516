use squishy::{GridId, MeshConfig, ParticleId, PhysicsError, PlayArea, Vec2, World, WorldConfig};
use wasm_bindgen::prelude::*;

const HEART: [&str; 3] = ["oo ", "oox", "xxx"];
const LUNGS: [&str; 5] = ["xx  ", "xox ", "xxxx", " xox", "  xx"];

fn js_error(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten(points: impl Iterator<Item = Vec2<f32>>) -> Vec<f32> {
    let mut out = Vec::new();
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

// ---- Creature Demo ----

/// A beating heart and a pair of lungs joined by one vein.
#[wasm_bindgen]
pub struct CreatureDemo {
    world: World<f32>,
    heart: GridId,
    lungs: GridId,
    vein: GridId,
    vein_ends: [ParticleId; 2],
    grabbed: Option<ParticleId>,
    time: f32,
    tear_threshold: f32,
    torn: bool,
}

#[wasm_bindgen]
impl CreatureDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CreatureDemo, JsValue> {
        let mut world = World::new(WorldConfig::new());
        world.set_play_area(Some(PlayArea::new(Vec2::new(350.0, 250.0), 240.0)));

        let heart = world
            .generate_mesh(
                &MeshConfig::new(2, 2)
                    .with_origin(180.0, 180.0)
                    .with_collision_def(&HEART),
            )
            .map_err(js_error)?;
        let lungs = world
            .generate_mesh(
                &MeshConfig::new(3, 4)
                    .with_origin(400.0, 140.0)
                    .with_init_scale(30.0)
                    .with_collision_def(&LUNGS),
            )
            .map_err(js_error)?;
        let vein = world
            .generate_mesh(
                &MeshConfig::new(15, 0)
                    .with_origin(160.0, 380.0)
                    .with_init_scale(25.0)
                    .with_collision_group(1),
            )
            .map_err(js_error)?;

        let slot = |world: &World<f32>, grid: GridId| {
            world.grid(grid).and_then(|g| g.vein_point(0)).map(|p| p.particle)
        };
        let end = |world: &World<f32>, x: usize| {
            world.grid(vein).and_then(|g| g.point(x, 0)).map(|p| p.particle)
        };
        let (Some(heart_slot), Some(lung_slot), Some(first), Some(last)) =
            (slot(&world, heart), slot(&world, lungs), end(&world, 0), end(&world, 15))
        else {
            return Err(JsValue::from_str("creature is missing a vein slot"));
        };
        world.attach_points(first, heart_slot).map_err(js_error)?;
        world.attach_points(last, lung_slot).map_err(js_error)?;

        Ok(CreatureDemo {
            world,
            heart,
            lungs,
            vein,
            vein_ends: [first, last],
            grabbed: None,
            time: 0.0,
            tear_threshold: 1.5,
            torn: false,
        })
    }

    pub fn update(&mut self, dt: f32) -> Result<(), JsValue> {
        self.time += dt;
        let pulse = 1.0 + (self.time * 3.0).sin() * 0.1;
        self.world.set_pulse_modifier(self.heart, pulse).map_err(js_error)?;
        self.world.update(dt);

        for end in self.vein_ends {
            if self.world.tear_if_overstressed(end, self.tear_threshold).map_err(js_error)? {
                self.torn = true;
            }
        }
        Ok(())
    }

    pub fn set_tear_threshold(&mut self, threshold: f32) {
        self.tear_threshold = threshold;
    }

    pub fn torn(&self) -> bool {
        self.torn
    }

    /// Pin the particle nearest the pointer to the pointer.
    pub fn grab(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.release()?;
        let pointer = Vec2::new(x, y);
        let Some(id) = self.world.nearest_particle(pointer, 30.0) else {
            return Ok(false);
        };
        self.world.affix_point(id, pointer).map_err(js_error)?;
        self.grabbed = Some(id);
        Ok(true)
    }

    pub fn release(&mut self) -> Result<(), JsValue> {
        if let Some(id) = self.grabbed.take() {
            self.world.unaffix_point(id).map_err(js_error)?;
        }
        Ok(())
    }

    /// Returns flat [x0, y0, x1, y1, ...] for every particle
    pub fn positions(&self) -> Vec<f32> {
        flatten(self.world.particles().iter().map(|p| p.position()))
    }

    /// Returns flat [x0, y0, ...] for 0 = heart, 1 = lungs, 2 = vein
    pub fn organ_positions(&self, organ: usize) -> Vec<f32> {
        let id = match organ {
            0 => self.heart,
            1 => self.lungs,
            _ => self.vein,
        };
        match self.world.grid(id) {
            Some(grid) => flatten(grid.positions.iter().map(|p| p.position())),
            None => Vec::new(),
        }
    }

    /// Pulse-scaled radii matching `organ_positions`
    pub fn organ_radii(&self, organ: usize) -> Vec<f32> {
        let id = match organ {
            0 => self.heart,
            1 => self.lungs,
            _ => self.vein,
        };
        match self.world.grid(id) {
            Some(grid) => (0..grid.point_count()).filter_map(|i| grid.radius(i)).collect(),
            None => Vec::new(),
        }
    }

    /// Returns [cx, cy, radius]
    pub fn play_area(&self) -> Vec<f32> {
        match self.world.play_area() {
            Some(area) => vec![area.center.x, area.center.y, area.radius],
            None => Vec::new(),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.world.particle_count()
    }
}
