//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One frame per tick, no delta-time scaling
//! - Seeded RNG only, and only for the initial layout
//! - Stable iteration order (registry order, ascending id)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod drag;
pub mod layout;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use boundary::resolve_boundary;
pub use collision::{Body, resolve_all_pairs, resolve_pair};
pub use drag::{DragController, DragSession, DragState};
pub use layout::generate_balls;
pub use snapshot::{BallInstance, BallView, Snapshot};
pub use state::{Arena, Ball, BallId, BallRegistry, Color, RngState};
pub use tick::{EventQueue, InputEvent, SimEvent, Simulation, move_balls, step};
