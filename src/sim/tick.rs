//! Fixed timestep simulation tick
//!
//! One tick redraws the frame and advances every projectile. Per projectile the
//! order is advance, draw, resolve: a projectile that hits or leaves the arena
//! is drawn once more at its final position in the tick it is removed.

use super::collision::resolve;
use super::state::SimulationSession;
use crate::renderer::Surface;
use crate::renderer::shapes::{draw_background, draw_projectile, draw_target, draw_turret};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number (1-based)
    pub tick: u64,
    /// Projectiles that destroyed a target
    pub hits: u32,
    /// Projectiles that left the arena
    pub expired: u32,
}

/// Advance the session by one step of `dt` seconds, drawing to `surface`
pub fn tick(session: &mut SimulationSession, surface: &mut dyn Surface, dt: f32) -> TickReport {
    session.time_ticks += 1;
    let mut report = TickReport {
        tick: session.time_ticks,
        ..Default::default()
    };

    let SimulationSession {
        arena,
        player,
        turret,
        projectiles,
        targets,
        ..
    } = session;

    draw_background(surface, player, arena.center());
    draw_turret(surface, turret);

    projectiles.retain_mut(|projectile| {
        projectile.advance(dt);
        draw_projectile(surface, projectile);

        let outcome = resolve(projectile.pos, targets, arena);
        if outcome.scored {
            player.credit_hit();
            report.hits += 1;
            log::debug!(
                "Projectile {} hit at ({:.1}, {:.1}), score {}",
                projectile.id,
                projectile.pos.x,
                projectile.pos.y,
                player.score
            );
        } else if outcome.removed {
            report.expired += 1;
        }
        !outcome.removed
    });

    for target in targets.iter() {
        draw_target(surface, target);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{CommandBuffer, DrawCommand};
    use crate::settings::Settings;
    use glam::Vec2;
    use proptest::prelude::*;

    fn session_with_pivot(pivot: Vec2) -> SimulationSession {
        let settings = Settings {
            turret_pivot: Some(pivot),
            ..Settings::default()
        };
        SimulationSession::new(&settings).unwrap()
    }

    #[test]
    fn test_projectile_hits_target_down_range() {
        let mut state = session_with_pivot(Vec2::new(100.0, 225.0));
        let target_pos = Vec2::new(400.0, 225.0);
        state.add_target(target_pos);
        state.fire();
        assert_eq!(state.projectiles.len(), 1);

        let mut surface = CommandBuffer::new();
        let mut hit_tick = None;
        for _ in 0..500 {
            let before = state.projectiles[0].clone();
            let report = tick(&mut state, &mut surface, SIM_DT);
            if report.hits == 1 {
                // The tick the projectile first came within range
                let mut moved = before.clone();
                moved.advance(SIM_DT);
                assert!(moved.pos.distance(target_pos) < HIT_RADIUS);
                assert!(before.pos.distance(target_pos) >= HIT_RADIUS);
                hit_tick = Some(report.tick);
                break;
            }
        }

        assert!(hit_tick.is_some(), "projectile never reached the target");
        assert_eq!(state.player.score, 1);
        assert!(state.targets.is_empty());
        assert!(state.projectiles.is_empty());
        // Collided frame still drew the projectile
        assert_eq!(surface.circles_with_radius(PROJECTILE_RADIUS).count(), 1);
        assert_eq!(surface.circles_with_radius(TARGET_RADIUS).count(), 0);
    }

    #[test]
    fn test_projectile_expires_at_arena_edge() {
        let mut state = session_with_pivot(Vec2::new(100.0, 300.0));
        state.turret.set_aim(std::f32::consts::PI);
        state.fire();

        let mut surface = CommandBuffer::new();
        let mut expired = 0;
        for _ in 0..10 {
            expired += tick(&mut state, &mut surface, SIM_DT).expired;
        }
        // Muzzle starts at x=0 and leaves on the first tick
        assert_eq!(expired, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_draw_order() {
        let mut state = session_with_pivot(Vec2::new(150.0, 263.0));
        state.add_target(Vec2::new(700.0, 500.0));
        state.fire();

        let mut surface = CommandBuffer::new();
        tick(&mut state, &mut surface, SIM_DT);

        let cmds = &surface.commands;
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[1], DrawCommand::Text { .. }));
        // Turret (5 commands), then projectile, then target
        assert!(matches!(cmds[7], DrawCommand::Circle { radius, .. } if radius == PROJECTILE_RADIUS));
        assert!(matches!(cmds[8], DrawCommand::Circle { radius, .. } if radius == TARGET_RADIUS));
        assert_eq!(cmds.len(), 9);
    }

    #[test]
    fn test_one_target_per_projectile_per_tick() {
        let mut state = session_with_pivot(Vec2::new(100.0, 225.0));
        // Three targets stacked on the muzzle's first stop
        for _ in 0..3 {
            state.add_target(Vec2::new(201.0, 225.0));
        }
        state.fire();
        let report = tick(&mut state, &mut CommandBuffer::new(), SIM_DT);
        assert_eq!(report.hits, 1);
        assert_eq!(state.targets.len(), 2);
        assert_eq!(state.player.score, 1);
    }

    #[test]
    fn test_two_projectiles_two_hits() {
        let mut state = session_with_pivot(Vec2::new(100.0, 225.0));
        state.add_target(Vec2::new(201.0, 225.0));
        state.add_target(Vec2::new(202.0, 225.0));
        state.fire();
        state.fire();
        let report = tick(&mut state, &mut CommandBuffer::new(), SIM_DT);
        assert_eq!(report.hits, 2);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.score, 2);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            aims in prop::collection::vec(-3.2f32..3.2, 1..20),
            seed in any::<u64>(),
        ) {
            let settings = Settings { seed, ..Settings::default() };
            let mut state = SimulationSession::new(&settings).unwrap();
            let mut surface = CommandBuffer::new();
            for _ in 0..MAX_TARGETS {
                state.spawn_target();
            }
            let mut last_score = 0;
            for aim in aims {
                state.turret.set_aim(aim);
                state.fire();
                for _ in 0..50 {
                    let targets_before = state.targets.len();
                    let report = tick(&mut state, &mut surface, SIM_DT);
                    prop_assert!(state.player.score >= last_score);
                    prop_assert_eq!(state.player.score - last_score, report.hits as u64);
                    prop_assert_eq!(targets_before - state.targets.len(), report.hits as usize);
                    prop_assert!(state.targets.len() <= MAX_TARGETS);
                    last_score = state.player.score;
                }
            }
        }
    }
}
