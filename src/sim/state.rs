//! Session state and entity models
//!
//! Everything the tick loop mutates lives in [`SimulationSession`]; there is
//! no ambient global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::{Arena, SpawnRegion};
use crate::consts::*;
use crate::error::Result;
use crate::renderer::Color;
use crate::settings::Settings;
use crate::{deg_to_rad, polar_to_cartesian};

/// The player's score
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub score: u64,
}

impl Player {
    /// Credit one confirmed hit
    pub fn credit_hit(&mut self) {
        self.score += 1;
    }
}

/// The player's turret (a tank with a rotating cannon)
#[derive(Debug, Clone)]
pub struct Turret {
    pub id: u32,
    /// Cannon pivot, also the center of the dome
    pub pivot: Vec2,
    /// Aim in degrees, as accumulated by steering
    pub aim_degrees: f32,
    /// Aim in radians (0 = right, positive = clockwise on screen)
    pub aim: f32,
    /// Hue given to the next projectile, in [0, 360)
    pub color_cycle: u16,
}

impl Turret {
    pub fn new(id: u32, pivot: Vec2) -> Self {
        Self {
            id,
            pivot,
            aim_degrees: 0.0,
            aim: 0.0,
            color_cycle: 0,
        }
    }

    /// Top-left corner of the tank body
    pub fn origin(&self) -> Vec2 {
        self.pivot - Vec2::new(PIVOT_OFFSET_X, PIVOT_OFFSET_Y)
    }

    /// Absolute aim (pointer aiming)
    pub fn set_aim(&mut self, angle: f32) {
        self.aim = angle;
        self.aim_degrees = angle.to_degrees();
    }

    /// Relative aim in degrees (discrete steering)
    pub fn adjust_aim(&mut self, delta_degrees: f32) {
        self.aim_degrees += delta_degrees;
        self.aim = deg_to_rad(self.aim_degrees);
    }

    /// Unit vector along the cannon
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.aim.cos(), self.aim.sin())
    }

    /// Position of the cannon tip
    pub fn muzzle(&self) -> Vec2 {
        self.pivot + polar_to_cartesian(CANNON_LENGTH, self.aim)
    }

    /// Build a projectile at the cannon tip and step the color cycle
    pub fn fire(&mut self, id: u32) -> Projectile {
        let projectile = Projectile {
            id,
            owner: self.id,
            pos: self.muzzle(),
            vel: self.direction(),
            color: Color::hue(self.color_cycle),
        };
        self.color_cycle += COLOR_STEP;
        if self.color_cycle >= 360 {
            self.color_cycle = 0;
        }
        projectile
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    /// Turret that fired it
    pub owner: u32,
    pub pos: Vec2,
    /// Units per reference step
    pub vel: Vec2,
    pub color: Color,
}

impl Projectile {
    /// Move, then accelerate.
    ///
    /// `dt` is in seconds; one `SIM_DT` moves by exactly `vel` and grows `vel`
    /// by `PROJECTILE_ACCELERATION`.
    pub fn advance(&mut self, dt: f32) {
        let steps = dt / SIM_DT;
        self.pos += self.vel * steps;
        self.vel *= PROJECTILE_ACCELERATION.powf(steps);
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A circular target
#[derive(Debug, Clone)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

impl Target {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: TARGET_RADIUS,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SimulationSession {
    pub arena: Arena,
    pub spawn_region: SpawnRegion,
    pub player: Player,
    pub turret: Turret,
    /// Live projectiles, in fire order
    pub projectiles: Vec<Projectile>,
    /// Live targets, in spawn order
    pub targets: Vec<Target>,
    /// Ticks run so far
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl SimulationSession {
    /// Build a session from validated settings.
    ///
    /// No target is spawned; the clock does the initial spawn.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let arena = Arena::new(settings.arena_width, settings.arena_height)?;
        let spawn_region = settings.spawn_region_for(&arena);

        let mut session = Self {
            arena,
            spawn_region,
            player: Player::default(),
            turret: Turret::new(0, settings.turret_pivot_for(&arena)),
            projectiles: Vec::new(),
            targets: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 1,
        };
        session.turret.id = session.next_entity_id();

        log::info!(
            "Session ready: arena {}x{}, turret at ({}, {}), seed {}",
            arena.width,
            arena.height,
            session.turret.pivot.x,
            session.turret.pivot.y,
            settings.seed
        );
        Ok(session)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire the turret; always adds exactly one projectile
    pub fn fire(&mut self) -> u32 {
        let id = self.next_entity_id();
        let projectile = self.turret.fire(id);
        self.projectiles.push(projectile);
        id
    }

    /// Spawn a target in the session's spawn region
    pub fn spawn_target(&mut self) -> bool {
        let region = self.spawn_region;
        self.spawn_target_in(&region)
    }

    /// Spawn a target in `region` unless the live cap is reached.
    ///
    /// Returns whether a target was added.
    pub fn spawn_target_in(&mut self, region: &SpawnRegion) -> bool {
        if self.targets.len() >= MAX_TARGETS {
            log::debug!("Spawn skipped: {} targets live", self.targets.len());
            return false;
        }
        let pos = region.sample(&mut self.rng);
        let id = self.next_entity_id();
        self.targets.push(Target::new(id, pos));
        log::debug!("Target {} spawned at ({:.1}, {:.1})", id, pos.x, pos.y);
        true
    }

    /// Place a target directly (scripted setups and tests)
    pub fn add_target(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target::new(id, pos));
        id
    }
}
