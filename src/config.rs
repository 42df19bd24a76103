//! Configuration types for the cloth solver.

use crate::error::ClothError;
use crate::pointer::Viewport;
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the external frame delta maps onto internal ticks.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimestepMode {
    /// Every `step` call advances exactly one tick of `timestep`, whatever
    /// delta the caller passes.
    Fixed,
    /// Deltas accumulate; each `step` consumes as many whole ticks as are
    /// owed, up to `max_substeps`. Backlog beyond that is dropped.
    Accumulated { max_substeps: usize },
}

/// Candidate-pair generator used by the self-collision pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadPhaseKind {
    /// Exhaustive O(n²) scan.
    AllPairs,
    /// Uniform grid hash keyed by collision-distance cells.
    SpatialHash,
}

/// Configuration for the solver pipeline.
///
/// # Builder Pattern
/// ```
/// use drape::config::{SolverConfig, TimestepMode};
/// use drape::Vec3;
///
/// let config = SolverConfig::new()
///     .with_iterations(10)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_timestep_mode(TimestepMode::Accumulated { max_substeps: 4 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Relaxation iterations per tick. Default: 8.
    pub iterations: usize,
    /// Run self-collision every `collision_interval` iterations. Default: 2.
    pub collision_interval: usize,
    /// Internal integration step in seconds. Default: 0.016.
    pub timestep: f32,
    /// How the delta passed to `step` maps onto ticks. Default: `Fixed`.
    pub timestep_mode: TimestepMode,
    /// Body acceleration applied while gravity is enabled.
    pub gravity: Vec3,
    /// Base wind force, scaled per particle by a random gust factor.
    pub wind: Vec3,
    /// Candidate-pair generator for self-collision. Default: `AllPairs`.
    pub broad_phase: BroadPhaseKind,
    /// Extent of the pointer coordinate space.
    pub viewport: Viewport,
}

impl SolverConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            iterations: 8,
            collision_interval: 2,
            timestep: 0.016,
            timestep_mode: TimestepMode::Fixed,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            wind: Vec3::new(4.0, 0.0, 2.0),
            broad_phase: BroadPhaseKind::AllPairs,
            viewport: Viewport::new(800.0, 600.0),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_collision_interval(mut self, interval: usize) -> Self {
        self.collision_interval = interval;
        self
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_timestep_mode(mut self, mode: TimestepMode) -> Self {
        self.timestep_mode = mode;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, wind: Vec3) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_broad_phase(mut self, broad_phase: BroadPhaseKind) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if self.iterations == 0 {
            return Err(ClothError::InvalidParameter { name: "iterations", value: 0.0 });
        }
        if self.collision_interval == 0 {
            return Err(ClothError::InvalidParameter { name: "collision_interval", value: 0.0 });
        }
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(ClothError::InvalidParameter { name: "timestep", value: self.timestep });
        }
        if let TimestepMode::Accumulated { max_substeps: 0 } = self.timestep_mode {
            return Err(ClothError::InvalidParameter { name: "max_substeps", value: 0.0 });
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidParameter {
                name: "gravity",
                value: self.gravity.length(),
            });
        }
        if !self.wind.is_finite() {
            return Err(ClothError::InvalidParameter { name: "wind", value: self.wind.length() });
        }
        self.viewport.validate()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
