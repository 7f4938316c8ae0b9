//! Session settings
//!
//! Loaded from JSON; every field is optional and falls back to the defaults
//! of the classic 800x600 range.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::arena::{Arena, SpawnRegion};

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Cannon pivot; `None` places the tank on the left, vertically centered
    pub turret_pivot: Option<Vec2>,
    /// Spawn rectangle; `None` uses the arena default
    pub spawn_region: Option<SpawnRegion>,

    // === Timing ===
    pub tick_period_ms: u64,
    pub spawn_interval_ms: u64,
    /// Seed for target placement
    pub seed: u64,

    // === Input ===
    /// Arrow keys steer, Space fires
    pub discrete_input: bool,
    /// Pointer aims, button press fires
    pub pointer_input: bool,
    /// Let the computer play
    pub autopilot: bool,
    /// Autopilot fires once every this many ticks
    pub autopilot_fire_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            turret_pivot: None,
            spawn_region: None,

            tick_period_ms: TICK_PERIOD_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            seed: 0,

            discrete_input: true,
            pointer_input: true,
            autopilot: false,
            autopilot_fire_every: 25,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject arenas, regions and periods the session cannot run with
    pub fn validate(&self) -> Result<()> {
        let arena = Arena::new(self.arena_width, self.arena_height)?;
        if self.tick_period_ms == 0 || self.spawn_interval_ms == 0 {
            return Err(SimError::InvalidPeriod);
        }
        let region = self.spawn_region_for(&arena);
        region.validate()?;
        if !arena.contains(Vec2::new(region.x0, region.y0)) {
            log::warn!(
                "Spawn region corner ({}, {}) lies outside the arena",
                region.x0,
                region.y0
            );
        }
        Ok(())
    }

    /// Configured spawn region, or the arena default
    pub fn spawn_region_for(&self, arena: &Arena) -> SpawnRegion {
        self.spawn_region
            .unwrap_or_else(|| SpawnRegion::for_arena(arena))
    }

    /// Configured pivot, or the classic spot left of center
    pub fn turret_pivot_for(&self, arena: &Arena) -> Vec2 {
        self.turret_pivot.unwrap_or_else(|| {
            // Tank body sits at (100, h/2 - 75)
            Vec2::new(100.0, arena.height / 2.0 - 75.0) + Vec2::new(PIVOT_OFFSET_X, PIVOT_OFFSET_Y)
        })
    }
}
