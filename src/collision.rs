//! Self-collision: pushes apart non-adjacent particles that came too close.
//!
//! The resolver is split into a broad phase, which proposes candidate pairs,
//! and a narrow phase ([`resolve_pair`]), which applies the positional
//! correction. [`AllPairs`] is the exhaustive O(n²) scan; [`SpatialHash`]
//! buckets particles into cells of `min_distance` and only proposes pairs
//! from adjacent cells.

use crate::config::BroadPhaseKind;
use crate::particle::Particle;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use glam::Vec3;

/// Minimum separation, as a fraction of grid spacing.
pub const MIN_DISTANCE_FACTOR: f32 = 0.6;
/// Pairs closer than this are considered coincident and left alone.
pub const COINCIDENT_DISTANCE: f32 = 0.001;

/// True if two grid indices are within the ring already held together by
/// structural, shear or bend springs.
pub fn are_neighbors(a: usize, b: usize, width: usize) -> bool {
    let (ax, ay) = (a % width, a / width);
    let (bx, by) = (b % width, b / width);
    let dc = ax.abs_diff(bx);
    let dr = ay.abs_diff(by);
    (dr <= 1 && dc <= 1) || (dr <= 2 && dc == 0) || (dr == 0 && dc <= 2)
}

/// Separates particles `i` and `j` to `min_distance` if they are closer,
/// splitting the correction by inverse mass.
///
/// `previous_position` moves with `position`, so no velocity is injected.
/// Returns whether a correction was applied.
pub fn resolve_pair(particles: &mut [Particle], i: usize, j: usize, min_distance: f32) -> bool {
    let (pi, pj) = (particles[i], particles[j]);
    if pi.is_pinned() || pj.is_pinned() {
        return false;
    }

    let delta = pj.position - pi.position;
    let distance = delta.length();
    if distance <= COINCIDENT_DISTANCE || distance >= min_distance {
        return false;
    }

    let normal = delta / distance;
    let penetration = min_distance - distance;
    let total_mass = pi.mass + pj.mass;
    let ratio_i = pj.mass / total_mass;
    let ratio_j = pi.mass / total_mass;

    particles[i].translate(-normal * (penetration * ratio_i));
    particles[j].translate(normal * (penetration * ratio_j));
    true
}

/// Proposes unordered candidate pairs `(i, j)` with `i < j`.
pub trait BroadPhase {
    fn candidate_pairs(
        &mut self,
        particles: &[Particle],
        min_distance: f32,
        pairs: &mut Vec<(usize, usize)>,
    );
}

/// Every pair of free particles.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllPairs;

impl BroadPhase for AllPairs {
    fn candidate_pairs(
        &mut self,
        particles: &[Particle],
        _min_distance: f32,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        for i in 0..particles.len() {
            if particles[i].is_pinned() {
                continue;
            }
            for j in (i + 1)..particles.len() {
                if particles[j].is_free() {
                    pairs.push((i, j));
                }
            }
        }
    }
}

/// Uniform-grid hash with cell size equal to the collision distance.
#[derive(Clone, Debug, Default)]
pub struct SpatialHash {
    cells: BTreeMap<(i32, i32, i32), Vec<usize>>,
}

impl SpatialHash {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_of(position: Vec3, cell_size: f32) -> (i32, i32, i32) {
        let c = (position / cell_size).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }
}

impl BroadPhase for SpatialHash {
    fn candidate_pairs(
        &mut self,
        particles: &[Particle],
        min_distance: f32,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        self.cells.clear();
        for (i, p) in particles.iter().enumerate().filter(|(_, p)| p.is_free()) {
            self.cells.entry(Self::cell_of(p.position, min_distance)).or_default().push(i);
        }

        for (i, p) in particles.iter().enumerate().filter(|(_, p)| p.is_free()) {
            let (cx, cy, cz) = Self::cell_of(p.position, min_distance);
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                            pairs.extend(bucket.iter().filter(|&&j| j > i).map(|&j| (i, j)));
                        }
                    }
                }
            }
        }
    }
}

/// Broad phase selected at runtime from [`BroadPhaseKind`].
#[derive(Clone, Debug)]
pub enum AnyBroadPhase {
    AllPairs(AllPairs),
    SpatialHash(SpatialHash),
}

impl From<BroadPhaseKind> for AnyBroadPhase {
    fn from(kind: BroadPhaseKind) -> Self {
        match kind {
            BroadPhaseKind::AllPairs => AnyBroadPhase::AllPairs(AllPairs),
            BroadPhaseKind::SpatialHash => AnyBroadPhase::SpatialHash(SpatialHash::new()),
        }
    }
}

impl BroadPhase for AnyBroadPhase {
    fn candidate_pairs(
        &mut self,
        particles: &[Particle],
        min_distance: f32,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        match self {
            AnyBroadPhase::AllPairs(b) => b.candidate_pairs(particles, min_distance, pairs),
            AnyBroadPhase::SpatialHash(b) => b.candidate_pairs(particles, min_distance, pairs),
        }
    }
}

/// Self-collision pass over a row-major grid of `width` columns.
#[derive(Clone, Debug)]
pub struct SelfCollision<B: BroadPhase = AnyBroadPhase> {
    width: usize,
    min_distance: f32,
    broad_phase: B,
    pairs: Vec<(usize, usize)>,
}

impl<B: BroadPhase> SelfCollision<B> {
    /// Resolver for a grid with the given column count and spacing.
    pub fn new(width: usize, spacing: f32, broad_phase: B) -> Self {
        SelfCollision {
            width,
            min_distance: spacing * MIN_DISTANCE_FACTOR,
            broad_phase,
            pairs: Vec::new(),
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Runs one pass and returns the number of corrected pairs.
    pub fn resolve(&mut self, particles: &mut [Particle]) -> usize {
        self.pairs.clear();
        self.broad_phase.candidate_pairs(particles, self.min_distance, &mut self.pairs);

        let mut corrections = 0;
        for &(i, j) in &self.pairs {
            if are_neighbors(i, j, self.width) {
                continue;
            }
            if resolve_pair(particles, i, j, self.min_distance) {
                corrections += 1;
            }
        }
        corrections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn neighbor_ring_matches_spring_reach() {
        let w = 5;
        let centre = 2 * w + 2;
        assert!(are_neighbors(centre, centre + 1, w));
        assert!(are_neighbors(centre, centre + w + 1, w));
        assert!(are_neighbors(centre, centre + 2, w));
        assert!(are_neighbors(centre, centre - 2 * w, w));
        assert!(!are_neighbors(centre, centre + w + 2, w));
        assert!(!are_neighbors(centre, centre + 2 * w + 1, w));
    }

    #[test]
    fn resolve_pair_restores_min_distance() {
        let mut particles = [
            Particle::new(Vec3::ZERO, 1.0),
            Particle::new(Vec3::new(0.2, 0.0, 0.0), 1.0),
        ];
        assert!(resolve_pair(&mut particles, 0, 1, 0.6));
        let d = particles[0].position.distance(particles[1].position);
        assert!((d - 0.6).abs() < 1e-6);
        assert!((particles[0].position.x + 0.2).abs() < 1e-6);
        assert_eq!(particles[0].velocity(), Vec3::ZERO);
        assert_eq!(particles[1].velocity(), Vec3::ZERO);
    }

    #[test]
    fn heavier_particle_moves_less() {
        let mut particles = [
            Particle::new(Vec3::ZERO, 3.0),
            Particle::new(Vec3::new(0.2, 0.0, 0.0), 1.0),
        ];
        resolve_pair(&mut particles, 0, 1, 0.6);
        // penetration 0.4 split 1:3
        assert!((particles[0].position.x + 0.1).abs() < 1e-6);
        assert!((particles[1].position.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn coincident_and_distant_pairs_are_ignored() {
        let mut particles = [
            Particle::new(Vec3::ZERO, 1.0),
            Particle::new(Vec3::new(0.0005, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(5.0, 0.0, 0.0), 1.0),
        ];
        assert!(!resolve_pair(&mut particles, 0, 1, 0.6));
        assert!(!resolve_pair(&mut particles, 0, 2, 0.6));
    }

    #[test]
    fn spatial_hash_finds_close_pairs() {
        let particles = vec![
            Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(0.3, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
            Particle::pinned(Vec3::new(0.1, 0.0, 0.0)),
        ];
        let mut pairs = Vec::new();
        SpatialHash::new().candidate_pairs(&particles, 0.6, &mut pairs);
        assert_eq!(pairs, vec![(0, 1)]);

        pairs.clear();
        AllPairs.candidate_pairs(&particles, 0.6, &mut pairs);
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }
}
