//! Cloth grid builder: particles, structural/shear/bend springs and anchors.

use crate::error::ClothError;
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};
use alloc::vec::Vec;
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rest-length factor for shear springs.
pub const SHEAR_FACTOR: f32 = 1.41;
/// Rest-length factor for bend springs.
pub const BEND_FACTOR: f32 = 2.0;

/// Dimensional and material parameters of a cloth grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Particles per row (columns).
    pub width: usize,
    /// Particles per column (rows).
    pub height: usize,
    /// Rest distance between neighbouring particles.
    pub spacing: f32,
    /// Base stiffness of structural and shear springs. Bend springs use half.
    pub stiffness: f32,
    /// Damping coefficient applied along every spring.
    pub damping: f32,
}

impl GridConfig {
    pub fn new(width: usize, height: usize, spacing: f32) -> Self {
        GridConfig { width, height, spacing, ..GridConfig::default() }
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if self.width < 2 || self.height < 2 {
            return Err(ClothError::InvalidGridDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ClothError::InvalidSpacing(self.spacing));
        }
        if !self.stiffness.is_finite() {
            return Err(ClothError::InvalidParameter { name: "stiffness", value: self.stiffness });
        }
        if !self.damping.is_finite() {
            return Err(ClothError::InvalidParameter { name: "damping", value: self.damping });
        }
        Ok(())
    }

    /// Extent of the rest configuration along X and Y.
    pub fn extent(&self) -> (f32, f32) {
        (self.width as f32 * self.spacing, self.height as f32 * self.spacing)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { width: 20, height: 20, spacing: 0.1, stiffness: 50.0, damping: 20.0 }
    }
}

/// The cloth: a row-major particle store and the springs between them.
///
/// Particle `(x, y)` has index `y * width + x` and rests at
/// `(x * spacing, y * spacing, 0)`. The two corners of row 0 are pinned.
#[derive(Clone, Debug)]
pub struct ClothGrid {
    config: GridConfig,
    particles: Vec<Particle>,
    springs: Vec<Spring>,
}

impl ClothGrid {
    pub fn new(config: GridConfig) -> Result<Self, ClothError> {
        config.validate()?;
        let mut grid = ClothGrid {
            config,
            particles: Vec::with_capacity(config.width * config.height),
            springs: Vec::new(),
        };
        grid.build();
        log::debug!(
            "built {}x{} cloth: {} particles, {} springs",
            config.width,
            config.height,
            grid.particles.len(),
            grid.springs.len(),
        );
        Ok(grid)
    }

    /// Discards all dynamic state and rebuilds the rest configuration.
    pub fn reset(&mut self) {
        self.build();
        log::debug!("cloth reset to rest configuration");
    }

    fn build(&mut self) {
        let GridConfig { width, height, spacing, stiffness, .. } = self.config;

        self.particles.clear();
        for y in 0..height {
            for x in 0..width {
                let position = Vec3::new(x as f32 * spacing, y as f32 * spacing, 0.0);
                self.particles.push(Particle::new(position, 1.0));
            }
        }

        let shear_length = spacing * SHEAR_FACTOR;
        let bend_length = spacing * BEND_FACTOR;
        let bend_stiffness = stiffness * 0.5;

        self.springs.clear();
        for y in 0..height {
            for x in 0..width {
                let index = y * width + x;
                let right = x + 1 < width;
                let down = y + 1 < height;

                if right {
                    self.push_spring(
                        index,
                        index + 1,
                        spacing,
                        stiffness,
                        SpringKind::StructuralRight,
                    );
                }
                if down {
                    self.push_spring(
                        index,
                        index + width,
                        spacing,
                        stiffness,
                        SpringKind::StructuralDown,
                    );
                }
                if right && down {
                    self.push_spring(
                        index,
                        index + width + 1,
                        shear_length,
                        stiffness,
                        SpringKind::ShearDiagonal,
                    );
                }
                if x > 0 && down {
                    self.push_spring(
                        index,
                        index + width - 1,
                        shear_length,
                        stiffness,
                        SpringKind::ShearAntiDiagonal,
                    );
                }
                if x + 2 < width {
                    self.push_spring(
                        index,
                        index + 2,
                        bend_length,
                        bend_stiffness,
                        SpringKind::BendHorizontal,
                    );
                }
                if y + 2 < height {
                    self.push_spring(
                        index,
                        index + 2 * width,
                        bend_length,
                        bend_stiffness,
                        SpringKind::BendVertical,
                    );
                }
            }
        }

        // Two hanging anchors.
        self.particles[0].pin();
        self.particles[width - 1].pin();
    }

    fn push_spring(&mut self, p1: usize, p2: usize, rest: f32, stiffness: f32, kind: SpringKind) {
        debug_assert!(p1 < self.particles.len() && p2 < self.particles.len());
        self.springs.push(Spring::new(p1, p2, rest, stiffness, kind));
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.config.width + x
    }

    /// Grid coordinates `(x, y)` of a particle index.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.config.width, index / self.config.width)
    }

    pub fn particle_at(&self, x: usize, y: usize) -> &Particle {
        &self.particles[self.index(x, y)]
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Split borrow for the force solver.
    pub fn parts_mut(&mut self) -> (&mut [Particle], &[Spring]) {
        (&mut self.particles, &self.springs)
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn pinned_indices(&self) -> Vec<usize> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_pinned())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of springs of the given connection class.
    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }

    pub fn config(&self) -> &GridConfig { &self.config }
    pub fn width(&self) -> usize { self.config.width }
    pub fn height(&self) -> usize { self.config.height }
    pub fn spacing(&self) -> f32 { self.config.spacing }
    pub fn stiffness(&self) -> f32 { self.config.stiffness }
    pub fn damping(&self) -> f32 { self.config.damping }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grid() -> ClothGrid {
        ClothGrid::new(GridConfig::new(4, 3, 1.0)).unwrap()
    }

    #[test]
    fn correct_particle_count() {
        assert_eq!(test_grid().particle_count(), 12);
    }

    #[test]
    fn spring_counts_per_class() {
        let grid = test_grid(); // 4 wide, 3 high
        assert_eq!(grid.count_of(SpringKind::StructuralRight), 9); // (4-1)*3
        assert_eq!(grid.count_of(SpringKind::StructuralDown), 8); // 4*(3-1)
        assert_eq!(grid.count_of(SpringKind::ShearDiagonal), 6); // (4-1)*(3-1)
        assert_eq!(grid.count_of(SpringKind::ShearAntiDiagonal), 6);
        assert_eq!(grid.count_of(SpringKind::BendHorizontal), 6); // (4-2)*3
        assert_eq!(grid.count_of(SpringKind::BendVertical), 4); // 4*(3-2)
        assert_eq!(grid.spring_count(), 39);
    }

    #[test]
    fn bend_springs_are_half_stiffness() {
        let grid = ClothGrid::new(GridConfig::new(3, 3, 0.5).with_stiffness(40.0)).unwrap();
        for s in grid.springs() {
            if s.kind.is_bend() {
                assert_eq!(s.stiffness, 20.0);
                assert_eq!(s.rest_length, 1.0);
            } else {
                assert_eq!(s.stiffness, 40.0);
            }
        }
    }

    #[test]
    fn top_corners_are_pinned() {
        let grid = test_grid();
        assert_eq!(grid.pinned_indices(), alloc::vec![0, 3]);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert_eq!(
            ClothGrid::new(GridConfig::new(1, 4, 1.0)).unwrap_err(),
            ClothError::InvalidGridDimensions { width: 1, height: 4 },
        );
        assert_eq!(
            ClothGrid::new(GridConfig::new(3, 3, -0.5)).unwrap_err(),
            ClothError::InvalidSpacing(-0.5),
        );
    }

    #[test]
    fn coords_round_trip_index() {
        let grid = test_grid();
        assert_eq!(grid.coords(grid.index(2, 1)), (2, 1));
    }
}
