//! Billiards - circular balls bouncing around a rectangular table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (walls, ball-ball collisions, drag-to-shoot)
//! - `config`: Construction parameters, loadable from JSON
//! - `error`: Construction-time failures

pub mod config;
pub mod error;
pub mod sim;

pub use config::SimConfig;
pub use error::{Error, Result};

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 20.0;
    pub const BALL_COUNT: usize = 25;
    /// Extra gap required between ball edges in the initial layout
    pub const MIN_SEPARATION: f64 = 40.0;
    /// Rejection-sampling attempts per ball before the layout gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Release velocity per unit of drag distance
    pub const DRAG_VELOCITY_SCALE: f64 = 0.1;

    /// Ball-ball response tuning. Not physical: reproduced as-is.
    pub const COLLISION_DAMPING: f64 = 0.1;
    pub const IMPULSE_LOSS: f64 = 0.9;
}

/// Rotate `v` by the angle whose sine/cosine are given.
///
/// `into_frame` rotates world space into the collision frame (by `-θ`);
/// otherwise rotates back out (by `+θ`).
#[inline]
pub fn rotate(v: DVec2, sin: f64, cos: f64, into_frame: bool) -> DVec2 {
    if into_frame {
        DVec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin)
    } else {
        DVec2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
    }
}

/// Signed distance from `p` to a circle (negative inside)
#[inline]
pub fn sd_circle(p: DVec2, center: DVec2, radius: f64) -> f64 {
    (p - center).length() - radius
}
