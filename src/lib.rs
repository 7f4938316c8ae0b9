//! Turret Range - a turret shooting gallery on a fixed-tick clock
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, tick loop, clock)
//! - `input`: Keyboard/pointer input controller and autopilot
//! - `renderer`: Drawing surface abstraction and entity shapes
//! - `settings`: Session configuration
//! - `error`: Configuration errors

pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference simulation step (10 ms, 100 Hz). Velocities are in units per step.
    pub const SIM_DT: f32 = 0.01;
    /// Tick period in milliseconds
    pub const TICK_PERIOD_MS: u64 = 10;
    /// Target spawn interval in milliseconds
    pub const SPAWN_INTERVAL_MS: u64 = 5000;
    /// Longest host frame the clock will catch up on in one call
    pub const MAX_FRAME_MS: u64 = 250;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Turret body, relative to the top-left of the tank
    pub const TURRET_BODY_WIDTH: f32 = 100.0;
    pub const TRACK_HEIGHT: f32 = 25.0;
    /// Offset from the tank's top-left corner to the cannon pivot
    pub const PIVOT_OFFSET_X: f32 = 50.0;
    pub const PIVOT_OFFSET_Y: f32 = 38.0;
    pub const TURRET_DOME_RADIUS: f32 = 25.0;
    /// Cannon length; projectiles leave from its tip
    pub const CANNON_LENGTH: f32 = 100.0;
    pub const CANNON_WIDTH: f32 = 8.0;

    /// Degrees of aim per steering key event
    pub const AIM_STEP_DEGREES: f32 = 2.0;
    /// Hue step per shot
    pub const COLOR_STEP: u16 = 5;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Velocity growth per reference step
    pub const PROJECTILE_ACCELERATION: f32 = 1.01;

    /// Target defaults
    pub const TARGET_RADIUS: f32 = 20.0;
    /// Projectile-target hit distance (independent of the drawn radius)
    pub const HIT_RADIUS: f32 = 25.0;
    pub const MAX_TARGETS: usize = 5;

    /// Default spawn region, `w`/`h` are inset from the arena's right/bottom
    pub const SPAWN_X0: f32 = 300.0;
    pub const SPAWN_Y0: f32 = 0.0;
    pub const SPAWN_INSET: f32 = 20.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
