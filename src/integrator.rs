//! Position Verlet integration with an inelastic ground plane.

use crate::particle::Particle;
use glam::Vec3;

/// Height of the ground plane.
pub const GROUND_Y: f32 = 0.0;
/// Fraction of velocity kept by a particle that hits the ground.
pub const GROUND_RESTITUTION: f32 = 0.1;

/// Advances every free particle by one step of length `h` and clears all
/// force accumulators.
///
/// `x' = 2x - x_prev + (f / m) h^2`. Particles that end below the ground are
/// clamped onto it and keep only [`GROUND_RESTITUTION`] of their velocity,
/// expressed by rewriting `previous_position`.
pub fn integrate(particles: &mut [Particle], h: f32) {
    let h2 = h * h;
    for p in particles.iter_mut() {
        if p.is_pinned() {
            p.force = Vec3::ZERO;
            continue;
        }

        let acceleration = p.force / p.mass;
        let next = 2.0 * p.position - p.previous_position + acceleration * h2;
        p.previous_position = p.position;
        p.position = next;
        p.force = Vec3::ZERO;

        if p.position.y < GROUND_Y {
            let velocity = p.velocity();
            p.position.y = GROUND_Y;
            p.previous_position = p.position - velocity * GROUND_RESTITUTION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_force_accelerates() {
        let mut particles = [Particle::new(Vec3::new(0.0, 10.0, 0.0), 2.0)];
        particles[0].force = Vec3::new(4.0, 0.0, 0.0);
        integrate(&mut particles, 0.1);
        // a = 2, dx = a h^2 = 0.02
        assert!((particles[0].position.x - 0.02).abs() < 1e-6);
        assert_eq!(particles[0].force, Vec3::ZERO);
        assert_eq!(particles[0].previous_position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn coasts_with_implicit_velocity() {
        let mut particles = [Particle::new(Vec3::new(1.0, 5.0, 0.0), 1.0)];
        particles[0].previous_position = Vec3::new(0.9, 5.0, 0.0);
        integrate(&mut particles, 0.016);
        assert!((particles[0].position.x - 1.1).abs() < 1e-6);
    }

    #[test]
    fn pinned_particle_does_not_move() {
        let mut particles = [Particle::pinned(Vec3::new(5.0, 5.0, 0.0))];
        particles[0].force = Vec3::new(1000.0, 1000.0, 0.0);
        integrate(&mut particles, 1.0 / 60.0);
        assert_eq!(particles[0].position, Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(particles[0].force, Vec3::ZERO);
    }

    #[test]
    fn ground_clamps_and_absorbs() {
        let mut particles = [Particle::new(Vec3::new(0.0, 0.05, 0.0), 1.0)];
        particles[0].previous_position = Vec3::new(0.0, 0.15, 0.0);
        integrate(&mut particles, 0.016);
        let p = &particles[0];
        assert_eq!(p.position.y, 0.0);
        // hit the floor at -0.1 per tick; 10% survives
        assert!((p.velocity().y + 0.01).abs() < 1e-6, "{}", p.velocity().y);
        assert_eq!(p.velocity().x, 0.0);
    }
}
