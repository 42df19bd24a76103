//! Mass-spring cloth simulation.
//!
//! `drape` owns a grid of point masses joined by structural, shear and bend
//! springs and advances it with Verlet integration under spring, damping,
//! gravity, wind and pointer-drag forces, with simple self-collision and a
//! ground plane. Rendering is left to the caller, which reads a snapshot of
//! particle positions each frame.
//!
//! # Features
//!
//! - **Grid builder**: row-major cloth with two pinned top corners
//! - **Force solver**: Hookean springs with damping along the spring axis
//! - **Relaxation**: repeated spring evaluation with periodic self-collision
//! - **Self-collision**: pluggable broad phase (`AllPairs`, `SpatialHash`)
//! - **Pointer drag**: grab a patch of cloth and pull it toward the cursor
//! - **Deterministic**: wind gusts come from an injectable, seedable RNG
//! - **Observable**: monitor ticks via the `StepObserver` trait
//! - **`no_std` compatible**: disable the default `std` feature
//!
//! ```
//! use drape::{ClothSession, GridConfig, NoOpStepObserver, SimulationFlags, SolverConfig};
//!
//! let mut cloth = ClothSession::seeded(GridConfig::new(10, 10, 0.1), SolverConfig::new(), 42)?;
//! let flags = SimulationFlags::new(true, false);
//! for _ in 0..60 {
//!     cloth.step(1.0 / 60.0, flags, &mut NoOpStepObserver);
//! }
//! assert_eq!(cloth.particles().len(), 100);
//! # Ok::<(), drape::ClothError>(())
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod particle;
pub mod spring;
pub mod grid;
pub mod force;
pub mod collision;
pub mod integrator;
pub mod pointer;
pub mod session;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use particle::Particle;
pub use spring::{Spring, SpringKind};
pub use grid::{ClothGrid, GridConfig};
pub use collision::{AllPairs, BroadPhase, SelfCollision, SpatialHash};
pub use pointer::Viewport;
pub use session::{ClothSession, SimulationFlags};
pub use config::{BroadPhaseKind, SolverConfig, TimestepMode};
pub use observer::{LogStepObserver, NoOpStepObserver, StepObserver};
pub use error::ClothError;
pub use glam::{Vec2, Vec3};
