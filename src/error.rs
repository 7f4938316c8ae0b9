//! Configuration errors
//!
//! Simulation steps are total; only building a session from settings can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Spawn region whose right/bottom edge lies before its left/top edge
    #[error("invalid spawn region: x0={x0} y0={y0} w={w} h={h} (need w >= x0 and h >= y0)")]
    InvalidRegion { x0: f32, y0: f32, w: f32, h: f32 },
    #[error("invalid arena size {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("tick period and spawn interval must be non-zero")]
    InvalidPeriod,
    #[error("settings parse error")]
    Config(#[from] serde_json::Error),
    #[error("settings read error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
