//! Session controller: owns the cloth and runs the per-tick pipeline.

use crate::collision::SelfCollision;
use crate::config::{SolverConfig, TimestepMode};
use crate::error::ClothError;
use crate::force::{apply_gravity, apply_wind, spring_forces};
use crate::grid::{ClothGrid, GridConfig};
use crate::integrator::integrate;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::pointer::drag_toward;
use crate::spring::Spring;
use alloc::vec::Vec;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Toggles owned by the caller (UI layer), passed in explicitly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationFlags {
    pub gravity: bool,
    pub wind: bool,
}

impl SimulationFlags {
    pub fn new(gravity: bool, wind: bool) -> Self {
        SimulationFlags { gravity, wind }
    }
}

/// A running cloth simulation.
///
/// Per tick: gravity, then `iterations` rounds of spring forces with a
/// self-collision pass every `collision_interval` rounds, then one Verlet
/// step. Wind and pointer drag are queued by the caller before `step`.
///
/// `R` is the random source for wind gusts; seed it for reproducible runs.
pub struct ClothSession<R: Rng = SmallRng> {
    grid: ClothGrid,
    config: SolverConfig,
    collision: SelfCollision,
    rng: R,
    accumulator: f32,
}

impl ClothSession<SmallRng> {
    /// Session whose wind gusts are seeded from OS entropy.
    #[cfg(feature = "std")]
    pub fn new(grid: GridConfig, config: SolverConfig) -> Result<Self, ClothError> {
        Self::with_rng(grid, config, SmallRng::from_os_rng())
    }

    /// Session with a reproducible wind sequence.
    pub fn seeded(grid: GridConfig, config: SolverConfig, seed: u64) -> Result<Self, ClothError> {
        Self::with_rng(grid, config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ClothSession<R> {
    pub fn with_rng(grid: GridConfig, config: SolverConfig, rng: R) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = ClothGrid::new(grid)?;
        let collision = SelfCollision::new(grid.width(), grid.spacing(), config.broad_phase.into());
        log::debug!(
            "cloth session: {} iterations, collision every {}, h = {}, {:?}, {:?}",
            config.iterations,
            config.collision_interval,
            config.timestep,
            config.timestep_mode,
            config.broad_phase,
        );
        Ok(ClothSession { grid, config, collision, rng, accumulator: 0.0 })
    }

    /// Advances the simulation and returns the number of internal ticks run.
    ///
    /// With [`TimestepMode::Fixed`] this is always one tick of `timestep`
    /// and `delta_time` is ignored. With [`TimestepMode::Accumulated`] the
    /// delta is banked and consumed in whole ticks; a call that owes no tick
    /// discards the forces queued since the last tick.
    pub fn step<O: StepObserver>(
        &mut self,
        delta_time: f32,
        flags: SimulationFlags,
        observer: &mut O,
    ) -> usize {
        let ticks = match self.config.timestep_mode {
            TimestepMode::Fixed => 1,
            TimestepMode::Accumulated { max_substeps } => self.owed_ticks(delta_time, max_substeps),
        };
        if ticks == 0 {
            for p in self.grid.particles_mut() {
                p.force = Vec3::ZERO;
            }
        }
        for _ in 0..ticks {
            self.tick(flags.gravity, observer);
        }
        observer.on_step_complete();
        log::trace!("step dt = {delta_time}: {ticks} ticks");
        ticks
    }

    fn owed_ticks(&mut self, delta_time: f32, max_substeps: usize) -> usize {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulator += delta_time;
        }
        let h = self.config.timestep;
        let owed = (self.accumulator / h) as usize;
        let ticks = owed.min(max_substeps);
        if owed > ticks {
            log::warn!("dropping {} ticks of backlog", owed - ticks);
        }
        self.accumulator -= owed as f32 * h;
        self.accumulator = self.accumulator.max(0.0);
        ticks
    }

    fn tick<O: StepObserver>(&mut self, gravity: bool, observer: &mut O) {
        let damping = self.grid.damping();
        let (particles, springs) = self.grid.parts_mut();

        if gravity {
            apply_gravity(particles, self.config.gravity);
        }
        observer.on_external_forces();

        for i in 0..self.config.iterations {
            spring_forces(particles, springs, damping);
            if i % self.config.collision_interval == 0 {
                let corrections = self.collision.resolve(particles);
                observer.on_collision_pass(corrections);
            }
            observer.on_relaxation_iteration(i);
        }

        integrate(particles, self.config.timestep);
        observer.on_integrate();
    }

    /// Queues a gusty wind force for the next tick. No-op unless
    /// `flags.wind` is set.
    pub fn apply_wind(&mut self, flags: SimulationFlags) {
        if !flags.wind {
            return;
        }
        apply_wind(self.grid.particles_mut(), self.config.wind, &mut self.rng);
    }

    /// Drags the cloth toward a pointer given in viewport coordinates.
    ///
    /// Returns the grabbed anchor, or `None` if not pressed or nothing is
    /// within reach.
    pub fn apply_pointer_constraint(&mut self, pointer: Vec2, pressed: bool) -> Option<usize> {
        if !pressed {
            return None;
        }
        let target = self.config.viewport.to_simulation(pointer, self.grid.config().extent());
        let spacing = self.grid.spacing();
        let anchor = drag_toward(self.grid.particles_mut(), target, spacing);
        log::trace!("pointer {pointer:?} -> {target:?}, anchor {anchor:?}");
        anchor
    }

    /// Rebuilds the cloth in its rest configuration.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.accumulator = 0.0;
    }

    pub fn particles(&self) -> &[Particle] {
        self.grid.particles()
    }

    pub fn springs(&self) -> &[Spring] {
        self.grid.springs()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.grid.positions()
    }

    pub fn particle_at(&self, x: usize, y: usize) -> &Particle {
        self.grid.particle_at(x, y)
    }

    pub fn grid(&self) -> &ClothGrid {
        &self.grid
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Time banked toward the next tick in accumulated mode.
    pub fn pending_time(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;

    fn session(config: SolverConfig) -> ClothSession {
        ClothSession::seeded(GridConfig::new(6, 6, 0.1), config, 1).unwrap()
    }

    #[test]
    fn fixed_mode_runs_one_tick_regardless_of_delta() {
        let mut s = session(SolverConfig::new());
        assert_eq!(s.step(0.5, SimulationFlags::default(), &mut NoOpStepObserver), 1);
        assert_eq!(s.step(0.0, SimulationFlags::default(), &mut NoOpStepObserver), 1);
    }

    #[test]
    fn accumulated_mode_banks_partial_ticks() {
        let config = SolverConfig::new()
            .with_timestep(0.01)
            .with_timestep_mode(TimestepMode::Accumulated { max_substeps: 3 });
        let mut s = session(config);
        let flags = SimulationFlags::default();
        assert_eq!(s.step(0.006, flags, &mut NoOpStepObserver), 0);
        assert_eq!(s.step(0.006, flags, &mut NoOpStepObserver), 1);
        assert!((s.pending_time() - 0.002).abs() < 1e-5);
        // 0.102 owed but capped at three ticks; backlog dropped
        assert_eq!(s.step(0.1, flags, &mut NoOpStepObserver), 3);
        assert!(s.pending_time() < 0.01);
    }

    #[test]
    fn wind_requires_flag() {
        let mut s = session(SolverConfig::new());
        s.apply_wind(SimulationFlags::new(true, false));
        assert!(s.particles().iter().all(|p| p.force == Vec3::ZERO));
        s.apply_wind(SimulationFlags::new(false, true));
        assert!(s.particles().iter().filter(|p| p.is_free()).all(|p| p.force.x > 0.0));
    }

    #[test]
    fn released_pointer_is_ignored() {
        let mut s = session(SolverConfig::new());
        let before = s.positions();
        assert_eq!(s.apply_pointer_constraint(Vec2::new(400.0, 300.0), false), None);
        assert_eq!(before, s.positions());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SolverConfig::new().with_iterations(0);
        let result = ClothSession::seeded(GridConfig::default(), config, 0);
        assert!(result.is_err());
    }
}
