//! Initial ball layout
//!
//! Balls are placed one at a time by rejection sampling: a candidate center is
//! drawn uniformly over the region where the ball fits inside the arena and is
//! kept only if it clears every ball already placed by the configured margin.
//! Each ball gets a bounded number of attempts.

use glam::DVec2;
use rand::Rng;

use super::state::{Arena, BallRegistry, Color};
use crate::config::SimConfig;
use crate::error::{Error, Result};

/// Lay out `config.ball_count` non-overlapping balls at rest.
///
/// Every pair ends up at least `r_a + r_b + min_separation` apart. Fails with
/// [`Error::PlacementFailed`] if some ball cannot be placed.
pub fn generate_balls(config: &SimConfig, rng: &mut impl Rng) -> Result<BallRegistry> {
    config.validate()?;

    let arena = Arena::new(config.arena_width, config.arena_height);
    let radius = config.ball_radius;
    let mut balls = BallRegistry::new();

    for placed in 0..config.ball_count {
        let pos = place_one(&balls, &arena, radius, config, rng).ok_or(Error::PlacementFailed {
            placed,
            requested: config.ball_count,
            attempts: config.max_placement_attempts,
        })?;
        balls.spawn(pos, radius, Color::random(rng));
    }

    Ok(balls)
}

fn place_one(
    balls: &BallRegistry,
    arena: &Arena,
    radius: f64,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<DVec2> {
    for _ in 0..config.max_placement_attempts {
        let candidate = DVec2::new(
            sample_axis(rng, arena.width, radius),
            sample_axis(rng, arena.height, radius),
        );
        let clear = balls
            .iter()
            .all(|b| candidate.distance(b.pos) >= radius + b.radius + config.min_separation);
        if clear {
            return Some(candidate);
        }
    }
    None
}

/// Uniform in `[radius, extent - radius)`
#[inline]
fn sample_axis(rng: &mut impl Rng, extent: f64, radius: f64) -> f64 {
    rng.random::<f64>() * (extent - radius * 2.0) + radius
}
