//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (`dt` is explicit)
//! - Seeded RNG only
//! - Stable iteration order (fire order / spawn order)
//! - Drawing only through the `Surface` trait

pub mod arena;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use arena::{Arena, SpawnRegion};
pub use clock::{Clock, ClockReport};
pub use collision::{Outcome, first_hit, resolve};
pub use state::{Player, Projectile, SimulationSession, Target, Turret};
pub use tick::{TickReport, tick};
