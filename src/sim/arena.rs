//! Arena bounds and target spawn region
//!
//! The arena is the rectangle `[0, width) x [0, height)` with the origin at the
//! top-left, y growing downward (canvas convention).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// The bounded play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    /// Whether a point lies inside the arena.
    ///
    /// Zero is inside; a coordinate equal to the width/height is outside.
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Rectangle targets spawn in.
///
/// `w` and `h` are absolute right/bottom coordinates, not extents: the
/// effective rectangle is `[x0, w] x [y0, h]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub x0: f32,
    pub y0: f32,
    pub w: f32,
    pub h: f32,
}

impl SpawnRegion {
    pub fn new(x0: f32, y0: f32, w: f32, h: f32) -> Result<Self> {
        let region = Self { x0, y0, w, h };
        region.validate()?;
        Ok(region)
    }

    /// Default region for an arena: right of the turret, inset from the far edges
    pub fn for_arena(arena: &Arena) -> Self {
        use crate::consts::{SPAWN_INSET, SPAWN_X0, SPAWN_Y0};
        Self {
            x0: SPAWN_X0,
            y0: SPAWN_Y0,
            w: arena.width - SPAWN_INSET,
            h: arena.height - SPAWN_INSET,
        }
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons and is rejected too
        if !(self.w >= self.x0 && self.h >= self.y0) {
            return Err(SimError::InvalidRegion {
                x0: self.x0,
                y0: self.y0,
                w: self.w,
                h: self.h,
            });
        }
        Ok(())
    }

    /// Draw a uniformly random point in the region
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let rx: f32 = rng.random();
        let ry: f32 = rng.random();
        Vec2::new(self.x0 + rx * (self.w - self.x0), self.y0 + ry * (self.h - self.y0))
    }
}
