//! Pointer drag: grabs the nearest free particle and a patch around it.

use crate::error::ClothError;
use crate::particle::Particle;
use glam::{Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capture radius for picking an anchor, in units of spacing.
pub const CAPTURE_RADIUS_FACTOR: f32 = 4.0;
/// Radius of the patch that follows the anchor, in units of spacing.
pub const FREEZE_RADIUS_FACTOR: f32 = 3.5;
/// Fraction of the remaining distance covered per call.
pub const FOLLOW_FACTOR: f32 = 0.8;

/// Extent of the external pointer coordinate space (e.g. window pixels).
///
/// Pointer `y` grows downward; simulation `y` grows upward.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ClothError::InvalidViewport { width: self.width, height: self.height })
        }
    }

    /// Maps a pointer position onto the `z = 0` plane of a cloth spanning
    /// `sim_extent` (`width * spacing`, `height * spacing`).
    pub fn to_simulation(&self, pointer: Vec2, sim_extent: (f32, f32)) -> Vec3 {
        let (sim_width, sim_height) = sim_extent;
        Vec3::new(
            pointer.x / self.width * sim_width,
            (1.0 - pointer.y / self.height) * sim_height,
            0.0,
        )
    }
}

/// Index of the free particle nearest `target`, if any lies strictly within
/// `radius`.
pub fn nearest_free(particles: &[Particle], target: Vec3, radius: f32) -> Option<usize> {
    particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_free())
        .map(|(i, p)| (i, p.position.distance_squared(target)))
        .filter(|&(_, d2)| d2 < radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Drags the particle nearest `target` (within `spacing * 4`) 80% of the way
/// toward it, and translates every other free particle within
/// `spacing * 3.5` of the anchor's original position by the same vector.
///
/// Only `position` moves; `previous_position` is left behind, so the drag
/// reads as a one-tick velocity impulse. Returns the anchor index.
pub fn drag_toward(particles: &mut [Particle], target: Vec3, spacing: f32) -> Option<usize> {
    let anchor = nearest_free(particles, target, spacing * CAPTURE_RADIUS_FACTOR)?;
    let origin = particles[anchor].position;
    let movement = (target - origin) * FOLLOW_FACTOR;
    let freeze_radius = spacing * FREEZE_RADIUS_FACTOR;

    for p in particles.iter_mut().filter(|p| p.is_free()) {
        if p.position.distance_squared(origin) < freeze_radius * freeze_radius {
            p.previous_position = p.position;
            p.position += movement;
        }
    }
    Some(anchor)
}
