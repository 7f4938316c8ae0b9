//! Session clock
//!
//! Turns host time into two independent fixed cadences: the simulation tick and
//! the target spawner. Host frames are irregular; both schedules are kept in
//! whole milliseconds so they never drift against each other.

use super::state::SimulationSession;
use super::tick::tick;
use crate::consts::MAX_FRAME_MS;
use crate::error::{Result, SimError};
use crate::renderer::Surface;

/// Totals for one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockReport {
    pub ticks: u32,
    pub spawned: u32,
    pub hits: u32,
    pub expired: u32,
}

#[derive(Debug, Clone)]
pub struct Clock {
    tick_period_ms: u64,
    spawn_interval_ms: u64,
    /// Session time in milliseconds
    now_ms: f64,
    next_tick_ms: u64,
    next_spawn_ms: u64,
}

impl Clock {
    pub fn new(tick_period_ms: u64, spawn_interval_ms: u64) -> Result<Self> {
        if tick_period_ms == 0 || spawn_interval_ms == 0 {
            return Err(SimError::InvalidPeriod);
        }
        Ok(Self {
            tick_period_ms,
            spawn_interval_ms,
            now_ms: 0.0,
            next_tick_ms: tick_period_ms,
            next_spawn_ms: spawn_interval_ms,
        })
    }

    /// Tick step in seconds
    pub fn dt(&self) -> f32 {
        self.tick_period_ms as f32 / 1000.0
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Session start: spawn the first target immediately
    pub fn start(&self, session: &mut SimulationSession) {
        session.spawn_target();
    }

    /// Run every tick and spawn that falls due within `elapsed_ms`.
    ///
    /// When both are due at the same instant the tick runs first.
    pub fn advance(
        &mut self,
        session: &mut SimulationSession,
        surface: &mut dyn Surface,
        elapsed_ms: f64,
    ) -> ClockReport {
        self.advance_with(session, surface, elapsed_ms, |_| {})
    }

    /// Like [`Clock::advance`], calling `before_tick` once right before each tick
    pub fn advance_with(
        &mut self,
        session: &mut SimulationSession,
        surface: &mut dyn Surface,
        elapsed_ms: f64,
        mut before_tick: impl FnMut(&mut SimulationSession),
    ) -> ClockReport {
        let mut elapsed = elapsed_ms.max(0.0);
        if elapsed > MAX_FRAME_MS as f64 {
            log::warn!(
                "Frame took {:.0} ms, catching up on {} ms only",
                elapsed,
                MAX_FRAME_MS
            );
            elapsed = MAX_FRAME_MS as f64;
        }
        let until = self.now_ms + elapsed;
        let dt = self.dt();
        let mut report = ClockReport::default();

        loop {
            let next = self.next_tick_ms.min(self.next_spawn_ms);
            if next as f64 > until {
                break;
            }
            if self.next_tick_ms <= self.next_spawn_ms {
                before_tick(session);
                let t = tick(session, surface, dt);
                report.ticks += 1;
                report.hits += t.hits;
                report.expired += t.expired;
                self.next_tick_ms += self.tick_period_ms;
            } else {
                if session.spawn_target() {
                    report.spawned += 1;
                }
                self.next_spawn_ms += self.spawn_interval_ms;
            }
        }

        self.now_ms = until;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{Color, CommandBuffer};
    use crate::sim::state::Projectile;
    use glam::Vec2;
    use crate::settings::Settings;

    fn setup() -> (SimulationSession, Clock, CommandBuffer) {
        let session = SimulationSession::new(&Settings::default()).unwrap();
        let clock = Clock::new(TICK_PERIOD_MS, SPAWN_INTERVAL_MS).unwrap();
        (session, clock, CommandBuffer::new())
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(Clock::new(0, 5000), Err(SimError::InvalidPeriod)));
        assert!(matches!(Clock::new(10, 0), Err(SimError::InvalidPeriod)));
    }

    #[test]
    fn test_ticks_follow_period() {
        let (mut session, mut clock, mut surface) = setup();
        assert_eq!(clock.advance(&mut session, &mut surface, 9.0).ticks, 0);
        assert_eq!(clock.advance(&mut session, &mut surface, 1.0).ticks, 1);
        assert_eq!(clock.advance(&mut session, &mut surface, 35.0).ticks, 3);
        assert_eq!(clock.advance(&mut session, &mut surface, 5.0).ticks, 1);
        assert_eq!(session.time_ticks, 5);
    }

    #[test]
    fn test_spawn_cadence() {
        let (mut session, mut clock, mut surface) = setup();
        clock.start(&mut session);
        assert_eq!(session.targets.len(), 1);

        let mut spawned = 0;
        // 20 seconds in 100 ms frames
        for _ in 0..200 {
            spawned += clock.advance(&mut session, &mut surface, 100.0).spawned;
        }
        assert_eq!(spawned, 4);
        assert_eq!(session.targets.len(), 5);
        assert_eq!(session.time_ticks, 2000);

        // Cap reached: the next interval is a no-op
        for _ in 0..50 {
            spawned += clock.advance(&mut session, &mut surface, 100.0).spawned;
        }
        assert_eq!(spawned, 4);
        assert_eq!(session.targets.len(), MAX_TARGETS);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let (mut session, mut clock, mut surface) = setup();
        let report = clock.advance(&mut session, &mut surface, 10_000.0);
        assert_eq!(report.ticks, (MAX_FRAME_MS / TICK_PERIOD_MS) as u32);
        assert_eq!(report.spawned, 0);
        assert!((clock.now_ms() - MAX_FRAME_MS as f64).abs() < 1e-9);
    }

    #[test]
    fn test_long_gap_runs_hook_once_per_tick() {
        let (mut session, mut clock, mut surface) = setup();
        let mut calls = 0u32;
        let report = clock.advance_with(&mut session, &mut surface, 60_000.0, |_| calls += 1);
        assert_eq!(report.ticks, (MAX_FRAME_MS / TICK_PERIOD_MS) as u32);
        assert_eq!(calls, report.ticks);
        assert_eq!(session.time_ticks, report.ticks as u64);

        // Regular frames: one call per tick, none for a partial period
        calls = 0;
        let report = clock.advance_with(&mut session, &mut surface, 16.0, |_| calls += 1);
        assert_eq!(report.ticks, 1);
        assert_eq!(calls, 1);
        let report = clock.advance_with(&mut session, &mut surface, 3.0, |_| calls += 1);
        assert_eq!(report.ticks, 0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_tick_runs_before_spawn_on_tie() {
        let (mut session, mut clock, mut surface) = setup();
        let last_tick_before = SPAWN_INTERVAL_MS - TICK_PERIOD_MS;
        let mut elapsed = 0;
        while elapsed < last_tick_before {
            clock.advance(&mut session, &mut surface, TICK_PERIOD_MS as f64);
            elapsed += TICK_PERIOD_MS;
        }
        assert!(session.targets.is_empty());

        // Fill every slot; the last one sits one step ahead of a projectile
        for i in 0..MAX_TARGETS - 1 {
            session.add_target(Vec2::new(700.0, 50.0 + 100.0 * i as f32));
        }
        let last = Vec2::new(400.0, 500.0);
        session.add_target(last);
        let id = session.next_entity_id();
        session.projectiles.push(Projectile {
            id,
            owner: session.turret.id,
            pos: last - Vec2::X,
            vel: Vec2::X,
            color: Color::hue(0),
        });

        // Tick and spawn are both due at SPAWN_INTERVAL_MS
        let report = clock.advance(&mut session, &mut surface, TICK_PERIOD_MS as f64);
        assert_eq!(clock.now_ms() as u64, SPAWN_INTERVAL_MS);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.hits, 1);
        assert_eq!(report.spawned, 1);
        assert_eq!(session.targets.len(), MAX_TARGETS);
        assert_eq!(session.player.score, 1);
    }

    #[test]
    fn test_dt_matches_reference_step() {
        let clock = Clock::new(TICK_PERIOD_MS, SPAWN_INTERVAL_MS).unwrap();
        assert_eq!(clock.dt(), SIM_DT);
    }
}
