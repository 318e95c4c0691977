//! Loop rates and fixed-step scheduling for the simulation and haptic threads.

use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Highest rate reachable through [`LoopRates::raise`].
pub const MAX_RATE_HZ: u32 = 10_000;
/// Increment used when raising a rate.
const RAISE_STEP_HZ: u32 = 50;
/// Decrement used when lowering a rate above [`LOWER_LINEAR_FLOOR_HZ`].
const LOWER_STEP_HZ: u32 = 100;
/// Below this rate, lowering halves instead of subtracting.
const LOWER_LINEAR_FLOOR_HZ: u32 = 200;

/// Update frequencies of the two loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LoopRates {
    /// Simulation tick rate. Default: 60 Hz.
    pub physics_hz: u32,
    /// Haptic device poll rate. Default: 1000 Hz.
    pub haptic_hz: u32,
}

impl Default for LoopRates {
    fn default() -> Self {
        Self {
            physics_hz: 60,
            haptic_hz: 1000,
        }
    }
}

impl LoopRates {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_hz == 0 {
            return Err(ConfigError::ZeroRate { name: "physics_hz" });
        }
        if self.haptic_hz == 0 {
            return Err(ConfigError::ZeroRate { name: "haptic_hz" });
        }
        Ok(())
    }

    pub fn physics_period(&self) -> Duration {
        period(self.physics_hz)
    }

    pub fn haptic_period(&self) -> Duration {
        period(self.haptic_hz)
    }

    /// How many haptic ticks run per physics tick.
    pub fn haptic_ticks_per_physics_tick(&self) -> f32 {
        self.haptic_hz as f32 / self.physics_hz.max(1) as f32
    }

    /// Step a rate up: +50 Hz while below [`MAX_RATE_HZ`].
    pub fn raise(hz: u32) -> u32 {
        if hz < MAX_RATE_HZ {
            (hz + RAISE_STEP_HZ).min(MAX_RATE_HZ)
        } else {
            hz
        }
    }

    /// Step a rate down: -100 Hz above 200 Hz, halve below. Never reaches zero.
    pub fn lower(hz: u32) -> u32 {
        if hz > LOWER_LINEAR_FLOOR_HZ {
            hz - LOWER_STEP_HZ
        } else {
            (hz / 2).max(1)
        }
    }

    pub fn raise_physics(&mut self) -> u32 {
        self.physics_hz = Self::raise(self.physics_hz);
        self.physics_hz
    }

    pub fn lower_physics(&mut self) -> u32 {
        self.physics_hz = Self::lower(self.physics_hz);
        self.physics_hz
    }

    pub fn raise_haptic(&mut self) -> u32 {
        self.haptic_hz = Self::raise(self.haptic_hz);
        self.haptic_hz
    }

    pub fn lower_haptic(&mut self) -> u32 {
        self.haptic_hz = Self::lower(self.haptic_hz);
        self.haptic_hz
    }
}

fn period(hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / hz.max(1) as f64)
}

/// Fixed timestep accumulator.
///
/// Feed it wall-clock deltas; it tells the caller how many fixed steps to run.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create a timestep of `1 / hz` seconds. Default max substeps: 4.
    pub fn new(hz: u32) -> Self {
        Self::with_max_substeps(hz, 4)
    }

    pub fn with_max_substeps(hz: u32, max_substeps: u32) -> Self {
        Self {
            step: 1.0 / hz.max(1) as f64,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Fixed step length in seconds.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Change the rate, keeping the accumulated time.
    pub fn set_rate(&mut self, hz: u32) {
        self.step = 1.0 / hz.max(1) as f64;
    }

    /// Add `delta_time` seconds and return the number of steps to run now.
    pub fn advance(&mut self, delta_time: f64) -> u32 {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop whatever the substep cap left behind to avoid spiral of death
        if substeps == self.max_substeps && self.accumulator >= self.step {
            tracing::warn!(
                backlog = self.accumulator,
                "simulation falling behind, dropping accumulated time"
            );
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }
}

/// Measures a loop's actual tick frequency over one-second windows.
#[derive(Debug, Clone)]
pub struct RateMeter {
    window: Duration,
    window_start: Instant,
    ticks: u32,
    last_hz: Option<f32>,
}

impl RateMeter {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, Duration::from_secs(1))
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            window,
            window_start: now,
            ticks: 0,
            last_hz: None,
        }
    }

    /// Count one tick. Returns the measured rate when a window closes.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.ticks += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window {
            return None;
        }
        let hz = self.ticks as f32 / elapsed.as_secs_f32();
        self.last_hz = Some(hz);
        self.ticks = 0;
        self.window_start = now;
        Some(hz)
    }

    /// Rate measured over the last complete window.
    pub fn last_hz(&self) -> Option<f32> {
        self.last_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_steps_and_caps() {
        assert_eq!(LoopRates::raise(60), 110);
        assert_eq!(LoopRates::raise(9_980), MAX_RATE_HZ);
        assert_eq!(LoopRates::raise(MAX_RATE_HZ), MAX_RATE_HZ);
    }

    #[test]
    fn test_lower_linear_then_halving() {
        assert_eq!(LoopRates::lower(1000), 900);
        assert_eq!(LoopRates::lower(250), 150);
        assert_eq!(LoopRates::lower(150), 75);
        assert_eq!(LoopRates::lower(1), 1);
    }

    #[test]
    fn test_rates_mutators() {
        let mut rates = LoopRates::default();
        assert_eq!(rates.raise_physics(), 110);
        assert_eq!(rates.lower_physics(), 55);
        assert_eq!(rates.raise_haptic(), 1050);
        assert_eq!(rates.lower_haptic(), 950);
        assert_eq!(rates.haptic_period(), Duration::from_secs_f64(1.0 / 950.0));
    }

    #[test]
    fn test_rates_validate() {
        assert!(LoopRates::default().validate().is_ok());
        let rates = LoopRates {
            physics_hz: 0,
            haptic_hz: 1000,
        };
        assert_eq!(
            rates.validate(),
            Err(ConfigError::ZeroRate { name: "physics_hz" })
        );
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut timestep = FixedTimestep::new(60);
        assert_eq!(timestep.advance(0.5 / 60.0), 0);
        assert_eq!(timestep.advance(0.6 / 60.0), 1);
        assert!((timestep.alpha() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_timestep_caps_substeps() {
        let mut timestep = FixedTimestep::new(100);
        // Half a second of backlog: only four steps run and the rest is dropped.
        assert_eq!(timestep.advance(0.5), 4);
        assert_eq!(timestep.alpha(), 0.0);
        assert_eq!(timestep.advance(0.0), 0);
    }

    #[test]
    fn test_fixed_timestep_drops_backlog_under_cap() {
        let mut timestep = FixedTimestep::with_max_substeps(100, 4);
        // 7.5 steps due: four run and the remaining 3.5 are dropped.
        assert_eq!(timestep.advance(0.075), 4);
        assert_eq!(timestep.alpha(), 0.0);
        assert_eq!(timestep.advance(0.0), 0);
    }

    #[test]
    fn test_fixed_timestep_keeps_fraction_at_cap() {
        let mut timestep = FixedTimestep::with_max_substeps(100, 4);
        assert_eq!(timestep.advance(0.045), 4);
        assert!(timestep.alpha() < 1.0);
        assert!((timestep.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_set_rate_keeps_accumulated_time() {
        let mut timestep = FixedTimestep::new(100);
        assert_eq!(timestep.step(), 0.01);
        assert_eq!(timestep.advance(0.005), 0);
        timestep.set_rate(200);
        assert_eq!(timestep.step(), 0.005);
        assert_eq!(timestep.advance(0.0), 1);
    }

    #[test]
    fn test_haptic_ticks_per_physics_tick() {
        let rates = LoopRates {
            physics_hz: 100,
            haptic_hz: 1000,
        };
        assert_eq!(rates.haptic_ticks_per_physics_tick(), 10.0);
        let stalled = LoopRates {
            physics_hz: 0,
            haptic_hz: 1000,
        };
        assert_eq!(stalled.haptic_ticks_per_physics_tick(), 1000.0);
    }

    #[test]
    fn test_rate_meter_reports_per_window() {
        let start = Instant::now();
        let mut meter = RateMeter::new(start);
        for i in 1..1000 {
            assert!(meter.tick(start + Duration::from_millis(i)).is_none());
        }
        let hz = meter.tick(start + Duration::from_millis(1000)).unwrap();
        assert!((hz - 1000.0).abs() < 1.0);
        assert_eq!(meter.last_hz(), Some(hz));
    }
}
