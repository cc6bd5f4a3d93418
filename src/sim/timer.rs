//! Shrink timer
//!
//! Countdown for the whole round, with a decaying "drop cutoff". Whenever the
//! remaining time crosses below the cutoff a shrink fires and the cutoff is
//! lowered again, so drops come faster and faster as the round runs out.

use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;

/// Timer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    /// Created but not started
    Idle,
    /// Counting down
    Running,
    /// Countdown reached zero; no further fires
    Expired,
}

/// Round countdown that schedules shrink events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrinkTimer {
    pub phase: TimerPhase,
    /// Seconds left in the round
    pub time_remaining: f32,
    /// Next shrink fires when `time_remaining` crosses below this
    pub drop_cutoff: f32,
    /// Multiplicative cutoff decay per fire, in (0, 1)
    decay_ratio: f32,
    /// Subtractive fallback once the multiplicative step gets too small
    min_step: f32,
}

impl ShrinkTimer {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: TimerPhase::Idle,
            time_remaining: config.game_duration_secs,
            drop_cutoff: config.game_duration_secs * config.shrink_interval_multiplier,
            decay_ratio: config.cutoff_decay_ratio,
            min_step: config.cutoff_min_step,
        }
    }

    /// Start the countdown
    pub fn start(&mut self) {
        if self.phase == TimerPhase::Idle {
            self.phase = TimerPhase::Running;
        }
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// Returns `true` when a shrink should fire this tick. Fires at most once
    /// per tick even if a huge `dt` crossed several cutoffs; the skipped
    /// cutoffs catch up on later ticks since the cutoff only moves after a
    /// fire.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }

        self.time_remaining -= dt;

        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.phase = TimerPhase::Expired;
            return false;
        }

        if self.time_remaining < self.drop_cutoff {
            self.lower_cutoff();
            return true;
        }

        false
    }

    /// Decay the cutoff: multiplicative while the step stays meaningful,
    /// subtractive after, so drop frequency keeps increasing.
    fn lower_cutoff(&mut self) {
        let decayed = self.drop_cutoff * self.decay_ratio;
        if self.drop_cutoff - decayed >= self.min_step {
            self.drop_cutoff = decayed;
        } else {
            self.drop_cutoff -= self.min_step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(duration: f32) -> TimerConfig {
        TimerConfig {
            game_duration_secs: duration,
            shrink_interval_multiplier: 0.8,
            cutoff_decay_ratio: 0.8,
            cutoff_min_step: 5.0,
        }
    }

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = ShrinkTimer::new(&config(100.0));
        assert_eq!(timer.phase, TimerPhase::Idle);
        for _ in 0..1000 {
            assert!(!timer.tick(1.0));
        }
        assert_eq!(timer.time_remaining, 100.0);
    }

    #[test]
    fn test_cutoff_strictly_decreases_and_fire_times_increase() {
        let mut timer = ShrinkTimer::new(&config(100.0));
        timer.start();

        let mut elapsed = 0.0f32;
        let mut last_cutoff = timer.drop_cutoff;
        let mut last_fire_at = -1.0f32;

        while timer.phase == TimerPhase::Running {
            let fired = timer.tick(0.5);
            elapsed += 0.5;
            if fired {
                assert!(timer.drop_cutoff < last_cutoff, "cutoff must strictly decrease");
                assert!(elapsed > last_fire_at, "fire times must strictly increase");
                last_cutoff = timer.drop_cutoff;
                last_fire_at = elapsed;
            }
        }

        assert_eq!(timer.phase, TimerPhase::Expired);
        assert!(last_fire_at > 0.0, "at least one fire expected");
    }

    #[test]
    fn test_switches_to_subtractive_step() {
        // Small cutoffs decay by the fixed step instead of the ratio
        let mut timer = ShrinkTimer::new(&config(20.0));
        timer.start();
        // Initial cutoff 16.0: 16 * 0.8 = 12.8, decrease 3.2 < 5.0 min step
        timer.time_remaining = 15.0;
        assert!(timer.tick(0.0001));
        assert!((timer.drop_cutoff - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_fires_at_most_once_per_tick() {
        let mut timer = ShrinkTimer::new(&config(100.0));
        timer.start();
        // Huge stall crossing several cutoffs still fires exactly once
        assert!(timer.tick(60.0));
        let cutoff_after_first = timer.drop_cutoff;
        // Next tick catches up against the lowered cutoff
        assert!(timer.tick(0.1));
        assert!(timer.drop_cutoff < cutoff_after_first);
    }

    #[test]
    fn test_no_fire_after_expiry() {
        let mut timer = ShrinkTimer::new(&config(10.0));
        timer.start();
        assert!(!timer.tick(20.0));
        assert_eq!(timer.phase, TimerPhase::Expired);
        assert!(!timer.tick(1.0));
        assert_eq!(timer.time_remaining, 0.0);
    }
}
