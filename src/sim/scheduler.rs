//! Spawn timers
//!
//! Three repeating timers (wave, obstacle, bonus) advanced by elapsed time,
//! independent of the tick rate. Reconfiguring stops all three, waits a short
//! settle delay, then restarts them at the new periods with fresh phase.

use serde::{Deserialize, Serialize};

/// Which spawner a timer feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnTimer {
    Wave,
    Obstacle,
    Bonus,
}

/// Period of each spawn timer, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPeriods {
    pub wave: f32,
    pub obstacle: f32,
    pub bonus: f32,
}

/// A timer that fires every `period` seconds while running
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    pub period: f32,
    elapsed: f32,
    running: bool,
}

impl RepeatingTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or restart) with a new period; the first fire is one period away
    pub fn start(&mut self, period: f32) {
        self.period = period;
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds and return how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || self.period <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// The three spawn timers plus the stop/settle/restart protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    wave: RepeatingTimer,
    obstacle: RepeatingTimer,
    bonus: RepeatingTimer,
    settle_delay: f32,
    /// Periods waiting to be applied and the settle time left before they are
    pending: Option<(SpawnPeriods, f32)>,
}

impl SpawnScheduler {
    /// Create a stopped scheduler
    pub fn new(periods: SpawnPeriods, settle_delay: f32) -> Self {
        Self {
            wave: RepeatingTimer::new(periods.wave),
            obstacle: RepeatingTimer::new(periods.obstacle),
            bonus: RepeatingTimer::new(periods.bonus),
            settle_delay,
            pending: None,
        }
    }

    /// Start all timers immediately at `periods`
    pub fn start(&mut self, periods: SpawnPeriods) {
        self.pending = None;
        self.wave.start(periods.wave);
        self.obstacle.start(periods.obstacle);
        self.bonus.start(periods.bonus);
    }

    /// Stop all timers and drop any pending restart
    pub fn stop_all(&mut self) {
        self.pending = None;
        self.wave.stop();
        self.obstacle.stop();
        self.bonus.stop();
    }

    /// Stop now, restart at `periods` once the settle delay has passed
    pub fn reconfigure(&mut self, periods: SpawnPeriods) {
        self.stop_all();
        self.pending = Some((periods, self.settle_delay));
        log::debug!(
            "Spawn timers stopped, restarting in {:.2}s at {:?}",
            self.settle_delay,
            periods
        );
    }

    /// True while any timer runs or a restart is pending
    pub fn is_active(&self) -> bool {
        self.pending.is_some() || self.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.wave.is_running() || self.obstacle.is_running() || self.bonus.is_running()
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Current (or pending) periods
    pub fn periods(&self) -> SpawnPeriods {
        match self.pending {
            Some((periods, _)) => periods,
            None => SpawnPeriods {
                wave: self.wave.period,
                obstacle: self.obstacle.period,
                bonus: self.bonus.period,
            },
        }
    }

    /// Advance all timers by `dt` seconds and collect the fires, in timer order
    pub fn advance(&mut self, dt: f32) -> Vec<SpawnTimer> {
        let mut dt = dt;
        if let Some((periods, remaining)) = self.pending.as_mut() {
            if *remaining > dt {
                *remaining -= dt;
                return Vec::new();
            }
            dt -= *remaining;
            let periods = *periods;
            self.start(periods);
            log::debug!("Spawn timers restarted at {:?}", periods);
        }

        let mut fires = Vec::new();
        for (kind, timer) in [
            (SpawnTimer::Wave, &mut self.wave),
            (SpawnTimer::Obstacle, &mut self.obstacle),
            (SpawnTimer::Bonus, &mut self.bonus),
        ] {
            for _ in 0..timer.advance(dt) {
                fires.push(kind);
            }
        }
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIODS: SpawnPeriods = SpawnPeriods {
        wave: 0.5,
        obstacle: 1.0,
        bonus: 3.0,
    };

    fn count(fires: &[SpawnTimer], kind: SpawnTimer) -> usize {
        fires.iter().filter(|&&k| k == kind).count()
    }

    #[test]
    fn test_stopped_scheduler_never_fires() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        assert!(s.advance(10.0).is_empty());
    }

    #[test]
    fn test_independent_periods() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        s.start(PERIODS);
        let mut fires = Vec::new();
        for _ in 0..60 {
            fires.extend(s.advance(0.1));
        }
        // 6 seconds, allowing for float accumulation on the last step
        assert!((11..=12).contains(&count(&fires, SpawnTimer::Wave)));
        assert!((5..=6).contains(&count(&fires, SpawnTimer::Obstacle)));
        assert!((1..=2).contains(&count(&fires, SpawnTimer::Bonus)));
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        s.start(PERIODS);
        let fires = s.advance(2.0);
        assert_eq!(count(&fires, SpawnTimer::Wave), 4);
        assert_eq!(count(&fires, SpawnTimer::Obstacle), 2);
        assert_eq!(count(&fires, SpawnTimer::Bonus), 0);
    }

    #[test]
    fn test_reconfigure_settles_before_restart() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        s.start(PERIODS);
        let faster = SpawnPeriods {
            wave: 0.5,
            obstacle: 0.8,
            bonus: 2.8,
        };
        s.reconfigure(faster);
        assert!(s.is_settling());
        assert!(!s.is_running());
        assert_eq!(s.periods(), faster);

        // Nothing fires during the settle delay
        assert!(s.advance(0.25).is_empty());
        assert!(s.advance(0.25).is_empty());
        assert!(s.is_running());

        // Restarted with fresh phase at the new periods
        let fires = s.advance(0.8);
        assert_eq!(count(&fires, SpawnTimer::Obstacle), 1);
        assert_eq!(count(&fires, SpawnTimer::Wave), 1);
    }

    #[test]
    fn test_settle_leftover_time_counts() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        s.reconfigure(PERIODS);
        let fires = s.advance(1.5);
        assert_eq!(count(&fires, SpawnTimer::Obstacle), 1);
        assert_eq!(count(&fires, SpawnTimer::Wave), 2);
    }

    #[test]
    fn test_stop_all_cancels_pending_restart() {
        let mut s = SpawnScheduler::new(PERIODS, 0.5);
        s.reconfigure(PERIODS);
        s.stop_all();
        assert!(!s.is_active());
        assert!(s.advance(5.0).is_empty());
    }
}
