//! Wall bounces against the arena rectangle

use glam::DVec2;

use super::state::Arena;

/// Keep a ball inside the arena, reflecting velocity off any wall it crossed.
///
/// Each axis is handled on its own: a ball past the far wall is moved back
/// until its edge touches the wall and that velocity component flips sign;
/// likewise for the near wall at zero. A ball out in a corner gets both
/// corrections. No energy is lost.
///
/// Calling this again on its own output changes nothing.
pub fn resolve_boundary(pos: DVec2, vel: DVec2, radius: f64, arena: &Arena) -> (DVec2, DVec2) {
    let (x, vx) = resolve_axis(pos.x, vel.x, radius, arena.width);
    let (y, vy) = resolve_axis(pos.y, vel.y, radius, arena.height);
    (DVec2::new(x, y), DVec2::new(vx, vy))
}

#[inline]
fn resolve_axis(center: f64, vel: f64, radius: f64, bound: f64) -> (f64, f64) {
    // Compared against the clamped center itself so a clamped value never re-triggers
    let far = bound - radius;
    if center > far {
        (far, -vel)
    } else if center < radius {
        (radius, -vel)
    } else {
        (center, vel)
    }
}
