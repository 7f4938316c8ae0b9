//! Draw calls for each entity type

use glam::Vec2;

use super::surface::{AngleRange, Color, Surface};
use crate::consts::*;
use crate::sim::state::{Player, Projectile, Target, Turret};

const TANK_GREEN: Color = Color::Hex(0x518261);
const CANNON_BROWN: Color = Color::Hex(0xa76745);

/// Clear the frame and draw the score in the middle of the arena
pub fn draw_background(surface: &mut dyn Surface, player: &Player, center: Vec2) {
    surface.clear();
    surface.draw_text(&player.score.to_string(), center);
}

/// Two tracks, the hull, the dome and the cannon
pub fn draw_turret(surface: &mut dyn Surface, turret: &Turret) {
    let origin = turret.origin();
    let track = Vec2::new(TURRET_BODY_WIDTH, TRACK_HEIGHT);
    surface.draw_rect(origin, track, TANK_GREEN);
    surface.draw_rect(origin + Vec2::new(0.0, 2.0 * TRACK_HEIGHT), track, TANK_GREEN);
    surface.draw_rect(
        origin + Vec2::new(10.0, 0.0),
        Vec2::new(TURRET_BODY_WIDTH - 20.0, 70.0),
        TANK_GREEN,
    );
    surface.draw_circle(
        turret.pivot,
        TURRET_DOME_RADIUS,
        AngleRange::FULL,
        Some(CANNON_BROWN),
        None,
        None,
    );
    surface.draw_line(turret.pivot, turret.muzzle(), CANNON_WIDTH, CANNON_BROWN);
}

pub fn draw_projectile(surface: &mut dyn Surface, projectile: &Projectile) {
    surface.draw_circle(
        projectile.pos,
        PROJECTILE_RADIUS,
        AngleRange::FULL,
        Some(projectile.color),
        None,
        None,
    );
}

pub fn draw_target(surface: &mut dyn Surface, target: &Target) {
    surface.draw_circle(
        target.pos,
        target.radius,
        AngleRange::FULL,
        Some(Color::RED),
        None,
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};

    #[test]
    fn test_turret_cannon_follows_aim() {
        let mut turret = Turret::new(1, Vec2::new(150.0, 263.0));
        turret.set_aim(std::f32::consts::PI);
        let mut buf = CommandBuffer::new();
        draw_turret(&mut buf, &turret);

        assert_eq!(buf.commands.len(), 5);
        match buf.commands.last() {
            Some(DrawCommand::Line { from, to, width, .. }) => {
                assert_eq!(*from, turret.pivot);
                assert!((*to - Vec2::new(50.0, 263.0)).length() < 1e-3);
                assert_eq!(*width, CANNON_WIDTH);
            }
            other => panic!("expected cannon line, got {:?}", other),
        }
        // Hull starts at the tank origin
        assert!(matches!(
            buf.commands[0],
            DrawCommand::Rect { pos, .. } if pos == Vec2::new(100.0, 225.0)
        ));
    }

    #[test]
    fn test_background_shows_score() {
        let mut buf = CommandBuffer::new();
        let player = Player { score: 7 };
        draw_background(&mut buf, &player, Vec2::new(400.0, 300.0));
        assert_eq!(buf.commands[0], DrawCommand::Clear);
        assert_eq!(
            buf.commands[1],
            DrawCommand::Text {
                value: "7".to_string(),
                pos: Vec2::new(400.0, 300.0)
            }
        );
    }
}
