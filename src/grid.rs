//! Particle grids (organs, veins) and their textual collision definitions.
//!
//! A grid of `width x height` cells has `(width + 1) x (height + 1)` points
//! stored column-major: point `(x, y)` lives at `y + x * (height + 1)`.
//! `height = 0` gives a chain, which is how veins are built.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::ParticleId;
use crate::vec::Vec2;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Index of a grid inside its [`World`](crate::world::World).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId(pub(crate) usize);

impl GridId {
    /// Position in the world's grid list.
    pub fn index(self) -> usize { self.0 }
}

/// Per-grid values shared by all of its springs and points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridParameters<F: Float> {
    /// Scales spring rest/max distances and point radii.
    pub pulse_modifier: F,
}

impl<F: Float> Default for GridParameters<F> {
    fn default() -> Self {
        GridParameters { pulse_modifier: F::one() }
    }
}

/// Renderer-facing handle for one particle of a grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point<F: Float> {
    pub x: F,
    pub y: F,
    pub base_radius: F,
    pub particle: ParticleId,
}

impl<F: Float> Point<F> {
    /// Last published position.
    pub fn position(&self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }

    /// Radius under the grid's pulse.
    pub fn radius(&self, parameters: &GridParameters<F>) -> F {
        self.base_radius * parameters.pulse_modifier
    }
}

/// A tagged point where veins may be bonded.
///
/// The tag is the character used in the collision definition; its case is
/// left for the caller to interpret.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VeinSlot {
    pub index: usize,
    pub tag: char,
}

/// A generated grid: the read-only view handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<F: Float> {
    pub width: usize,
    pub height: usize,
    pub positions: AllocVec<Point<F>>,
    pub parameters: GridParameters<F>,
    pub collision_group: u32,
    pub vein_slots: AllocVec<VeinSlot>,
}

impl<F: Float> Grid<F> {
    /// Column-major index of point `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y + x * (self.height + 1)
    }

    /// Point `(x, y)`, or `None` outside the grid.
    pub fn point(&self, x: usize, y: usize) -> Option<&Point<F>> {
        if x > self.width || y > self.height {
            return None;
        }
        self.positions.get(self.index(x, y))
    }

    /// Radius of the point at `index`, pulse included.
    pub fn radius(&self, index: usize) -> Option<F> {
        self.positions.get(index).map(|p| p.radius(&self.parameters))
    }

    /// Point index of the `n`-th vein slot.
    pub fn vein_index(&self, n: usize) -> Option<usize> {
        self.vein_slots.get(n).map(|s| s.index)
    }

    /// Point of the `n`-th vein slot.
    pub fn vein_point(&self, n: usize) -> Option<&Point<F>> {
        self.vein_index(n).and_then(|i| self.positions.get(i))
    }

    /// Number of points, `(width + 1) * (height + 1)`.
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }
}

/// Configuration for [`World::generate_mesh`](crate::world::World::generate_mesh).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshConfig<F: Float> {
    /// Position of point (0, 0).
    pub x: F,
    pub y: F,
    /// Cell counts; the grid has one more point than cells on each axis.
    pub width: usize,
    pub height: usize,
    /// Spacing between neighbouring points.
    pub init_scale: F,
    pub collision_group: u32,
    /// Rows listed top to bottom, `height + 1` rows of `width + 1` chars.
    pub collision_def: Option<AllocVec<String>>,
    pub stiffness: F,
    pub damping: F,
    pub inertia: F,
    /// Defaults to `0.4 * init_scale`.
    pub particle_radius: Option<F>,
    /// Add skip-one springs along both axes.
    pub second_order_springs: bool,
}

impl<F: Float> MeshConfig<F> {
    /// Mesh at the origin with default spacing and springs.
    pub fn new(width: usize, height: usize) -> Self {
        MeshConfig {
            x: F::zero(),
            y: F::zero(),
            width,
            height,
            init_scale: F::from_f32(50.0),
            collision_group: 0,
            collision_def: None,
            stiffness: F::from_f32(40.0),
            damping: F::from_f32(0.5),
            inertia: F::one(),
            particle_radius: None,
            second_order_springs: false,
        }
    }

    /// Position of point (0, 0).
    pub fn with_origin(mut self, x: F, y: F) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Spacing between neighbouring points.
    pub fn with_init_scale(mut self, init_scale: F) -> Self {
        self.init_scale = init_scale;
        self
    }

    /// Only particles of the same group collide.
    pub fn with_collision_group(mut self, group: u32) -> Self {
        self.collision_group = group;
        self
    }

    /// Collision rows, top to bottom.
    pub fn with_collision_def(mut self, rows: &[&str]) -> Self {
        self.collision_def = Some(rows.iter().map(|r| String::from(*r)).collect());
        self
    }

    /// Stiffness and damping of every mesh spring.
    pub fn with_springs(mut self, stiffness: F, damping: F) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }

    /// Inertia of every mesh particle.
    pub fn with_inertia(mut self, inertia: F) -> Self {
        self.inertia = inertia;
        self
    }

    /// Override the default `0.4 * init_scale` radius.
    pub fn with_particle_radius(mut self, radius: F) -> Self {
        self.particle_radius = Some(radius);
        self
    }

    /// Toggle skip-one springs.
    pub fn with_second_order_springs(mut self, enabled: bool) -> Self {
        self.second_order_springs = enabled;
        self
    }

    /// Radius given to each mesh particle.
    pub fn particle_radius(&self) -> F {
        self.particle_radius
            .unwrap_or_else(|| self.init_scale * F::from_f32(0.4))
    }

    /// Positions, collision flags and spring edges of the mesh.
    ///
    /// Creates up to 3 kinds of edges:
    /// - Structural: horizontal + vertical neighbours (rest = scale)
    /// - Shear: both diagonals of every cell (rest = scale * sqrt(2))
    /// - Second order: skip-one horizontal + vertical (rest = scale * 2)
    pub fn layout(&self) -> Result<MeshLayout<F>, PhysicsError> {
        let cols = self.width + 1;
        let rows = self.height + 1;
        let (collides, vein_slots) = match &self.collision_def {
            Some(def) => parse_collision_def(def, self.width, self.height)?,
            None => (vec![true; cols * rows], AllocVec::new()),
        };

        let scale = self.init_scale;
        let idx = |x: usize, y: usize| y + x * rows;

        let mut positions = AllocVec::with_capacity(cols * rows);
        for x in 0..cols {
            for y in 0..rows {
                positions.push(Vec2::new(
                    self.x + F::from_f32(x as f32) * scale,
                    self.y + F::from_f32(y as f32) * scale,
                ));
            }
        }

        let diag_length = (scale * scale + scale * scale).sqrt();
        let second_length = scale * F::two();
        let mut edges = AllocVec::new();

        // Structural: horizontal
        for x in 0..self.width {
            for y in 0..rows {
                edges.push(MeshEdge::new(idx(x, y), idx(x + 1, y), scale));
            }
        }

        // Structural: vertical
        for x in 0..cols {
            for y in 0..self.height {
                edges.push(MeshEdge::new(idx(x, y), idx(x, y + 1), scale));
            }
        }

        // Shear: diagonals
        for x in 0..self.width {
            for y in 0..self.height {
                edges.push(MeshEdge::new(idx(x, y), idx(x + 1, y + 1), diag_length));
                edges.push(MeshEdge::new(idx(x + 1, y), idx(x, y + 1), diag_length));
            }
        }

        if self.second_order_springs {
            for x in 0..cols.saturating_sub(2) {
                for y in 0..rows {
                    edges.push(MeshEdge::new(idx(x, y), idx(x + 2, y), second_length));
                }
            }
            for x in 0..cols {
                for y in 0..rows.saturating_sub(2) {
                    edges.push(MeshEdge::new(idx(x, y), idx(x, y + 2), second_length));
                }
            }
        }

        Ok(MeshLayout { positions, collides, edges, vein_slots })
    }
}

/// Spring between two points of a mesh, by point index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshEdge<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_distance: F,
}

impl<F: Float> MeshEdge<F> {
    fn new(a: usize, b: usize, rest_distance: F) -> Self {
        MeshEdge { a, b, rest_distance }
    }
}

/// Everything needed to instantiate a mesh, indexed column-major.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshLayout<F: Float> {
    pub positions: AllocVec<Vec2<F>>,
    pub collides: AllocVec<bool>,
    pub edges: AllocVec<MeshEdge<F>>,
    pub vein_slots: AllocVec<VeinSlot>,
}

/// Collision mask and vein slots from definition rows.
///
/// Space: no collision. `x`: collides. Anything else: collides and marks a
/// vein slot. Slots are listed in reading order.
fn parse_collision_def(
    def: &[String],
    width: usize,
    height: usize,
) -> Result<(AllocVec<bool>, AllocVec<VeinSlot>), PhysicsError> {
    let expected_rows = height + 1;
    let expected_cols = width + 1;
    let mismatch = |cols: usize| PhysicsError::ShapeMismatch {
        expected_rows,
        expected_cols,
        rows: def.len(),
        cols,
    };

    if def.len() != expected_rows {
        return Err(mismatch(def.first().map_or(0, |r| r.chars().count())));
    }
    if let Some(row) = def.iter().find(|r| r.chars().count() != expected_cols) {
        return Err(mismatch(row.chars().count()));
    }

    let mut collides = vec![false; expected_rows * expected_cols];
    let mut slots = AllocVec::new();
    for (i, row) in def.iter().enumerate() {
        let y = height - i;
        for (x, c) in row.chars().enumerate() {
            let index = y + x * expected_rows;
            match c {
                ' ' => {}
                'x' => collides[index] = true,
                tag => {
                    collides[index] = true;
                    slots.push(VeinSlot { index, tag });
                }
            }
        }
    }
    Ok((collides, slots))
}
