//! Particle-spring soft-body physics for 2D creature simulations.
//!
//! `squishy` moves point masses with a fourth-order Runge-Kutta integrator,
//! pushes them around with damped springs and one-frame penalty contacts, and
//! keeps springs from over-stretching with a few relaxation sweeps per frame.
//! Organs are grids of particles; veins are chains bonded to tagged slots on
//! those grids and can be torn when they stretch too far.
//!
//! # Features
//!
//! - **RK4 integration**: Neighbours frozen at the frame-start snapshot
//! - **Springs**: Anchor or particle targets, optional max distance, pulse scaling
//! - **Contacts**: O(n²) overlap detection plus an optional circular play area
//! - **Meshes**: Grids and chains with textual collision definitions and vein slots
//! - **Bonds**: Attach, detach, stress queries and tearing
//! - **Observable**: Monitor frame stages via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use squishy::{MeshConfig, Vec2, World, WorldConfig};
//!
//! let mut world: World<f64> = World::new(WorldConfig::new());
//! let heart = world
//!     .generate_mesh(&MeshConfig::new(2, 2).with_collision_def(&["oo ", "oox", "xxx"]))
//!     .unwrap();
//! let grid = world.grid(heart).unwrap();
//! let top_left = grid.point(0, 2).unwrap().particle;
//! world.affix_point(top_left, Vec2::new(0.0, 100.0)).unwrap();
//! world.update(1.0 / 60.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod state;
pub mod spring;
pub mod particle;
pub mod contact;
pub mod force;
pub mod integrator;
pub mod collision;
pub mod constraint;
pub mod grid;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use state::{Derivative, State};
pub use spring::{Spring, SpringId, SpringParams, SpringTarget};
pub use particle::{Attachment, Particle, ParticleId};
pub use contact::Contact;
pub use force::ForceGenerator;
pub use collision::PlayArea;
pub use grid::{Grid, GridId, MeshConfig, Point, VeinSlot};
pub use world::World;
pub use config::WorldConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
