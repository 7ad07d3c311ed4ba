//! Ball-ball collision detection and response
//!
//! Each overlapping pair is reduced to a 1-D problem: both balls are rotated
//! into a frame whose x-axis runs from the first center to the second, the
//! x-velocities are exchanged with an elastic formula that uses radius in
//! place of mass, and the result is rotated back out.
//!
//! The response is deliberately not energy-conserving. After the exchange both
//! x-velocities are scaled by [`COLLISION_DAMPING`] and then bled into each
//! other by [`IMPULSE_LOSS`], in that order. Observable behavior depends on the
//! exact sequence, so keep it.

use glam::DVec2;

use crate::consts::{COLLISION_DAMPING, IMPULSE_LOSS};
use crate::rotate;

/// The physical part of a ball, as seen by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Body {
    pub const fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }
}

/// True if the two bodies overlap (touching does not count)
#[inline]
pub fn overlapping(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// Resolve a collision between two bodies.
///
/// Returns `None` when the bodies do not overlap, otherwise the corrected
/// pair `(a', b')`. Pure: nothing is remembered between calls.
///
/// Coincident centers collide along the world x-axis. If both rotated
/// x-velocities come out zero, the positions are left overlapping for this
/// call, except for coincident centers, which are split evenly along x.
pub fn resolve_pair(a: &Body, b: &Body) -> Option<(Body, Body)> {
    if !overlapping(a, b) {
        return None;
    }
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    let angle = if distance == 0.0 { 0.0 } else { delta.y.atan2(delta.x) };
    let (sin, cos) = angle.sin_cos();

    // Frame origin at a's center
    let mut pos0 = DVec2::ZERO;
    let mut pos1 = rotate(delta, sin, cos, true);
    let mut vel0 = rotate(a.vel, sin, cos, true);
    let mut vel1 = rotate(b.vel, sin, cos, true);

    let vx_total = vel0.x - vel1.x;
    vel0.x = ((a.radius - b.radius) * vel0.x + 2.0 * b.radius * vel1.x) / min_distance;
    vel1.x = vx_total + vel0.x;

    vel0.x *= COLLISION_DAMPING;
    vel1.x *= COLLISION_DAMPING;

    vel0.x -= IMPULSE_LOSS * vel1.x;
    vel1.x -= IMPULSE_LOSS * vel0.x;

    // Push apart along the frame x-axis, split by speed share
    let abs_v = vel0.x.abs() + vel1.x.abs();
    let overlap = min_distance - (pos0.x - pos1.x).abs();
    if abs_v > 0.0 {
        pos0.x += vel0.x / abs_v * overlap;
        pos1.x += vel1.x / abs_v * overlap;
    } else if distance == 0.0 {
        // Stacked and at rest: nothing else would ever separate them
        pos0.x -= overlap / 2.0;
        pos1.x += overlap / 2.0;
    } else {
        log::trace!("Zero rotated velocity; skipping separation this frame");
    }

    let a_out = Body::new(
        a.pos + rotate(pos0, sin, cos, false),
        rotate(vel0, sin, cos, false),
        a.radius,
    );
    let b_out = Body::new(
        a.pos + rotate(pos1, sin, cos, false),
        rotate(vel1, sin, cos, false),
        b.radius,
    );
    Some((a_out, b_out))
}

/// Resolve every unordered pair once, in ascending `(i, j)` order.
///
/// Later pairs see the output of earlier ones. There is no iteration to
/// convergence, so chains of overlaps take several frames to settle.
/// Returns the number of pairs that collided.
pub fn resolve_all_pairs(bodies: &mut [Body]) -> usize {
    let mut hits = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if let Some((a, b)) = resolve_pair(&bodies[i], &bodies[j]) {
                bodies[i] = a;
                bodies[j] = b;
                hits += 1;
            }
        }
    }
    hits
}
