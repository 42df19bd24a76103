//! Point masses for the cloth grid.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Verlet particle: position-based state with implicit velocity.
///
/// `mass == 0` marks the particle as pinned. Pinned particles never receive
/// forces and are skipped by the integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    pub position: Vec3,
    pub previous_position: Vec3,
    /// Force accumulator, cleared by every integration pass.
    pub force: Vec3,
    pub mass: f32,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn new(position: Vec3, mass: f32) -> Self {
        Particle {
            position,
            previous_position: position,
            force: Vec3::ZERO,
            mass: mass.max(0.0),
        }
    }

    /// A particle that never moves.
    pub fn pinned(position: Vec3) -> Self {
        Particle::new(position, 0.0)
    }

    pub fn is_pinned(&self) -> bool {
        self.mass <= 0.0
    }

    pub fn is_free(&self) -> bool {
        !self.is_pinned()
    }

    /// Pin in place, dropping any velocity and pending force.
    pub fn pin(&mut self) {
        self.mass = 0.0;
        self.previous_position = self.position;
        self.force = Vec3::ZERO;
    }

    /// Displacement over the last step (Verlet velocity, per tick).
    pub fn velocity(&self) -> Vec3 {
        self.position - self.previous_position
    }

    /// Adds `force` unless the particle is pinned.
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_free() {
            self.force += force;
        }
    }

    /// Moves the particle and its history by the same offset, so the
    /// implicit velocity is unchanged.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.previous_position += offset;
    }
}
