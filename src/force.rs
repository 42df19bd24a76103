//! Force accumulation: gravity, gusty wind and damped springs.
//!
//! Every function adds into [`Particle::force`]; nothing here moves a
//! particle. Pinned particles are skipped throughout.

use crate::particle::Particle;
use crate::spring::Spring;
use glam::Vec3;
use rand::Rng;

/// Springs shorter than this are treated as momentarily coincident.
pub const MIN_SPRING_LENGTH: f32 = 1e-6;

/// Lower and upper bound of the per-particle wind gust factor.
pub const GUST_RANGE: (f32, f32) = (0.5, 1.5);

/// Adds `gravity * mass` to every free particle.
pub fn apply_gravity(particles: &mut [Particle], gravity: Vec3) {
    for p in particles.iter_mut().filter(|p| p.is_free()) {
        p.force += gravity * p.mass;
    }
}

/// Adds `wind * gust * mass` to every free particle, with an independent
/// gust factor in [`GUST_RANGE`] drawn from `rng` per particle.
pub fn apply_wind<R: Rng>(particles: &mut [Particle], wind: Vec3, rng: &mut R) {
    for p in particles.iter_mut().filter(|p| p.is_free()) {
        let gust: f32 = rng.random_range(GUST_RANGE.0..=GUST_RANGE.1);
        p.force += wind * gust * p.mass;
    }
}

/// Accumulates elastic and damping forces of every spring.
///
/// Uses each spring's own stiffness and the shared `damping` coefficient.
/// Velocities are the implicit Verlet ones (`position - previous_position`).
pub fn spring_forces(particles: &mut [Particle], springs: &[Spring], damping: f32) {
    for spring in springs {
        accumulate(particles, spring, spring.stiffness, damping);
    }
}

/// Like [`spring_forces`] but overrides every spring's stiffness with
/// `stiffness`.
pub fn spring_forces_uniform(
    particles: &mut [Particle],
    springs: &[Spring],
    stiffness: f32,
    damping: f32,
) {
    for spring in springs {
        accumulate(particles, spring, stiffness, damping);
    }
}

fn accumulate(particles: &mut [Particle], spring: &Spring, stiffness: f32, damping: f32) {
    let a = particles[spring.p1];
    let b = particles[spring.p2];
    if a.is_pinned() && b.is_pinned() {
        return;
    }

    let delta = b.position - a.position;
    let length = delta.length();
    if length < MIN_SPRING_LENGTH {
        return;
    }
    let direction = delta / length;

    let elastic = stiffness * (length - spring.rest_length);
    let relative_velocity = b.velocity() - a.velocity();
    let damped = damping * relative_velocity.dot(direction);
    let force = direction * (elastic + damped);

    particles[spring.p1].apply_force(force);
    particles[spring.p2].apply_force(-force);
}
