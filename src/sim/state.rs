//! Ball registry and core simulation types
//!
//! The registry is the only owner of ball state. Everything else refers to
//! balls by [`BallId`].

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Stable ball identity, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallId(pub u32);

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ball_{}", self.0)
    }
}

/// Display color. Has no effect on physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random opaque color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.random(), rng.random(), rng.random())
    }

    /// Normalized RGBA for GPU upload
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `rgb(r, g, b)` or `#rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let channels = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match channels.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A simulated ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: DVec2,
    /// Position delta per frame
    pub vel: DVec2,
    pub radius: f64,
    pub color: Color,
    /// Set only while a drag session holds this ball
    pub dragging: bool,
}

impl Ball {
    pub fn new(id: BallId, pos: DVec2, radius: f64, color: Color) -> Self {
        Self {
            id,
            pos,
            vel: DVec2::ZERO,
            radius,
            color,
            dragging: false,
        }
    }

    /// True if `point` lies on or inside the ball
    pub fn contains(&self, point: DVec2) -> bool {
        crate::sd_circle(point, self.pos, self.radius) <= 0.0
    }
}

/// Fixed rectangular bounds with the origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// True if the whole ball lies inside the arena
    pub fn contains_ball(&self, pos: DVec2, radius: f64) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Owner of all ball state
///
/// Balls are kept in creation order, which is also ascending id order. That
/// order drives hit-testing and pair resolution, so it never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallRegistry {
    balls: Vec<Ball>,
    next_id: u32,
}

impl BallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ball at rest and return its new id
    pub fn spawn(&mut self, pos: DVec2, radius: f64, color: Color) -> BallId {
        let id = BallId(self.next_id);
        self.next_id += 1;
        self.balls.push(Ball::new(id, pos, radius, color));
        id
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        let i = self.index_of(id)?;
        Some(&self.balls[i])
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        let i = self.index_of(id)?;
        Some(&mut self.balls[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    pub fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    /// First ball (in registry order) containing `point`
    pub fn hit_test(&self, point: DVec2) -> Option<BallId> {
        self.balls.iter().find(|b| b.contains(point)).map(|b| b.id)
    }

    fn index_of(&self, id: BallId) -> Option<usize> {
        // Ids ascend with index, so binary search is valid
        self.balls.binary_search_by_key(&id, |b| b.id).ok()
    }
}
