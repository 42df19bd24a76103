//! Step observer trait for monitoring solver progress.

/// Hooks into the per-tick pipeline.
///
/// Implement this trait to debug, visualize or profile the solver. All
/// methods have default no-op implementations.
pub trait StepObserver {
    /// Called after gravity has been accumulated for a tick.
    fn on_external_forces(&mut self) {}

    /// Called after each relaxation iteration.
    fn on_relaxation_iteration(&mut self, _iteration: usize) {}

    /// Called after a self-collision pass with the number of corrected pairs.
    fn on_collision_pass(&mut self, _corrections: usize) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a `step` call is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards pipeline events to the `log` facade at trace level and counts
/// collision corrections.
#[derive(Debug, Default)]
pub struct LogStepObserver {
    pub ticks: usize,
    pub corrections: usize,
}

impl StepObserver for LogStepObserver {
    fn on_relaxation_iteration(&mut self, iteration: usize) {
        log::trace!("tick {} relaxation iteration {}", self.ticks, iteration);
    }

    fn on_collision_pass(&mut self, corrections: usize) {
        self.corrections += corrections;
        if corrections > 0 {
            log::trace!("tick {}: {} self-collision corrections", self.ticks, corrections);
        }
    }

    fn on_integrate(&mut self) {
        self.ticks += 1;
    }

    fn on_step_complete(&mut self) {
        log::trace!("step complete after {} ticks", self.ticks);
    }
}
