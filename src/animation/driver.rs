//! Animation driver - start/stop/reset state machine around the tick pipeline.

use serde::{Deserialize, Serialize};

use crate::compute::{FieldStats, FieldStore};
use crate::render::{PixelBuffer, RasterTarget, Renderer};
use crate::schema::{ConfigError, SeedSet, SimulationParams};

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    /// Never started. Ticks are ignored.
    Stopped,
    /// Ticks advance the field.
    Running,
    /// Halted after running; grid and time are kept.
    Paused,
}

/// Read-only view handed to the host after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub total: f32,
    pub max: f32,
    pub entropy: f32,
    pub simulated_time: f32,
    pub step: u64,
}

/// Cooperative tick driver.
///
/// The host owns the schedule and calls [`AnimationDriver::tick`] at its own
/// cadence (see [`super::Cadence`]). Each running tick performs
/// stepper → statistics → renderer synchronously, so no reader ever sees a
/// half-updated grid.
///
/// Usage:
/// ```
/// use epistemic_topology::animation::AnimationDriver;
/// use epistemic_topology::render::PixelBuffer;
/// use epistemic_topology::schema::{SeedSet, SimulationParams};
///
/// let mut driver = AnimationDriver::new(SimulationParams::default(), SeedSet::default());
/// driver.attach_target(PixelBuffer::square(500).unwrap());
/// driver.start();
/// let snapshot = driver.tick().expect("running");
/// assert!(snapshot.total > 0.0);
/// ```
pub struct AnimationDriver<T: RasterTarget = PixelBuffer> {
    store: FieldStore,
    renderer: Renderer,
    target: Option<T>,
    stats: FieldStats,
    state: DriverState,
}

impl<T: RasterTarget> AnimationDriver<T> {
    /// Create a stopped driver with a freshly seeded field and no render target.
    pub fn new(params: SimulationParams, seeds: SeedSet) -> Self {
        let store = FieldStore::new(params, seeds);
        let stats = FieldStats::from_grid(store.grid());
        Self {
            store,
            renderer: Renderer::new(),
            target: None,
            stats,
            state: DriverState::Stopped,
        }
    }

    /// Attach a render target and paint the current grid onto it.
    pub fn attach_target(&mut self, target: T) {
        self.target = Some(target);
        self.repaint();
    }

    /// Detach and return the render target.
    pub fn detach_target(&mut self) -> Option<T> {
        self.target.take()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Reset the field and enter `Running`. Starting while running resets and continues.
    pub fn start(&mut self) {
        self.reset();
        if self.state != DriverState::Running {
            log::info!("Driver {:?} -> Running", self.state);
        }
        self.state = DriverState::Running;
    }

    /// Halt ticking, leaving grid and time as they are.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            log::info!("Driver Running -> Paused at t={:.1}", self.store.time());
            self.state = DriverState::Paused;
        }
    }

    /// Continue a paused run without resetting.
    pub fn resume(&mut self) {
        if self.state == DriverState::Paused {
            log::info!("Driver Paused -> Running");
            self.state = DriverState::Running;
        }
    }

    /// Re-stamp the seeds, rewind time and repaint. The lifecycle state is unchanged.
    pub fn reset(&mut self) {
        self.store.reset();
        self.refresh();
    }

    /// Validate and apply new parameters between ticks.
    ///
    /// A grid size change reinitializes the field.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ConfigError> {
        params.validate()?;
        let resized = params.grid_size != self.store.params().grid_size;
        self.store.set_params(params);
        if resized {
            self.refresh();
        }
        Ok(())
    }

    /// Validate and replace the seed set used by subsequent resets.
    pub fn set_seeds(&mut self, seeds: SeedSet) -> Result<(), ConfigError> {
        seeds.validate()?;
        self.store.set_seeds(seeds);
        Ok(())
    }

    /// Advance one tick if running.
    ///
    /// Returns the post-tick snapshot, or `None` when not running.
    pub fn tick(&mut self) -> Option<TickSnapshot> {
        if self.state != DriverState::Running {
            return None;
        }

        self.store.advance();
        self.stats = FieldStats::from_grid(self.store.grid());
        if !self.repaint() {
            log::trace!("No render target, skipped paint");
        }

        let snapshot = self.snapshot();
        log::trace!(
            "Tick {}: total={:.3} max={:.3} entropy={:.3}",
            snapshot.step,
            snapshot.total,
            snapshot.max,
            snapshot.entropy
        );
        Some(snapshot)
    }

    /// Statistics and time as of the last completed tick or reset.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            total: self.stats.total,
            max: self.stats.max,
            entropy: self.stats.entropy,
            simulated_time: self.store.time(),
            step: self.store.step_count(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn stats(&self) -> &FieldStats {
        &self.stats
    }

    fn refresh(&mut self) {
        self.stats = FieldStats::from_grid(self.store.grid());
        self.repaint();
    }

    fn repaint(&mut self) -> bool {
        let target = self.target.as_mut().map(|t| t as &mut dyn RasterTarget);
        self.renderer.paint(self.store.grid(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Grid;
    use crate::schema::{DENSITY_CAP, DT, SeedPoint};

    fn driver() -> AnimationDriver {
        AnimationDriver::new(SimulationParams::default(), SeedSet::default())
    }

    #[test]
    fn test_starts_stopped_and_ignores_ticks() {
        let mut driver = driver();
        assert_eq!(driver.state(), DriverState::Stopped);
        assert!(driver.tick().is_none());
        assert_eq!(driver.store().step_count(), 0);
    }

    #[test]
    fn test_start_then_tick() {
        let mut driver = driver();
        driver.start();
        let snapshot = driver.tick().unwrap();

        assert_eq!(snapshot.step, 1);
        assert!((snapshot.simulated_time - DT).abs() < 1e-6);
        assert_eq!(snapshot, driver.snapshot());
        assert_eq!(*driver.stats(), FieldStats::from_grid(driver.store().grid()));
    }

    #[test]
    fn test_stop_keeps_state() {
        let mut driver = driver();
        driver.start();
        for _ in 0..5 {
            driver.tick();
        }
        let grid = driver.store().grid().clone();

        driver.stop();
        assert_eq!(driver.state(), DriverState::Paused);
        assert!(driver.tick().is_none());
        assert_eq!(driver.store().grid(), &grid);
        assert_eq!(driver.store().step_count(), 5);

        driver.resume();
        assert!(driver.tick().is_some());
        assert_eq!(driver.store().step_count(), 6);
    }

    #[test]
    fn test_restart_resets() {
        let mut driver = driver();
        driver.start();
        for _ in 0..5 {
            driver.tick();
        }
        driver.start();

        assert!(driver.is_running());
        assert_eq!(driver.snapshot().simulated_time, 0.0);
        assert_eq!(
            driver.store().grid(),
            &Grid::from_seeds(&SeedSet::default(), 100)
        );
    }

    #[test]
    fn test_reset_while_paused_stays_paused() {
        let mut driver = driver();
        driver.start();
        driver.tick();
        driver.stop();
        driver.reset();

        assert_eq!(driver.state(), DriverState::Paused);
        assert_eq!(driver.snapshot().step, 0);
    }

    #[test]
    fn test_tick_paints_target() {
        let mut driver = driver();
        driver.attach_target(PixelBuffer::square(100).unwrap());
        // Seed centre (20, 20) has density 1.0 -> red.
        assert_eq!(driver.target().unwrap().pixel(20, 20), (255, 0, 0));

        driver.start();
        driver.tick();
        let canvas = driver.target().unwrap();
        // Empty corners fill in slowly from the creation floor but stay blue.
        assert_eq!(canvas.pixel(0, 0).2, 255);
    }

    #[test]
    fn test_tick_without_target_still_advances() {
        let mut driver = driver();
        driver.start();
        assert!(driver.tick().is_some());
        assert!(driver.detach_target().is_none());
        assert_eq!(driver.store().step_count(), 1);
    }

    #[test]
    fn test_set_params_validates() {
        let mut driver = driver();
        let bad = SimulationParams {
            creation: 1.0,
            ..SimulationParams::default()
        };
        assert!(driver.set_params(bad).is_err());
        assert_eq!(driver.store().params(), &SimulationParams::default());
    }

    #[test]
    fn test_set_seeds_validates() {
        let mut driver = driver();
        let bad = SeedSet {
            seeds: vec![SeedPoint::new(50, 50, f32::INFINITY)],
        };
        assert!(matches!(
            driver.set_seeds(bad),
            Err(ConfigError::SeedIntensity { index: 0, .. })
        ));
        assert_eq!(driver.store().seeds(), &SeedSet::default());

        let single = SeedSet {
            seeds: vec![SeedPoint::new(50, 50, DENSITY_CAP)],
        };
        driver.set_seeds(single).unwrap();
        driver.reset();
        assert_eq!(driver.snapshot().max, DENSITY_CAP);
        assert!(driver.snapshot().total.is_finite());
    }

    #[test]
    fn test_set_params_resize_refreshes_stats() {
        let mut driver = driver();
        driver.start();
        driver.tick();

        let params = SimulationParams {
            grid_size: 10,
            ..SimulationParams::default()
        };
        driver.set_params(params).unwrap();

        // No default seed lands inside a 10x10 grid.
        assert_eq!(driver.snapshot().total, 0.0);
        assert_eq!(driver.snapshot().step, 0);
        assert!(driver.is_running());
    }
}
