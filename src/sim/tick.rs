//! Per-frame simulation step
//!
//! One call to [`step`] advances every ball by one frame: integrate (or pin
//! the held ball), bounce off walls, then resolve every overlapping pair once.
//! Frames have no duration; velocity is a position delta per frame.
//!
//! Input and frame ticks arrive as [`SimEvent`]s through an [`EventQueue`] and
//! are applied strictly in order, so a frame never sees half an input.

use std::collections::VecDeque;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boundary::resolve_boundary;
use super::collision::{Body, resolve_all_pairs};
use super::drag::DragController;
use super::layout::generate_balls;
use super::snapshot::Snapshot;
use super::state::{Arena, BallId, BallRegistry, Color, RngState};
use crate::config::SimConfig;
use crate::error::Result;

/// External input, in arena-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(DVec2),
    PointerUp(DVec2),
    /// Recolor the selected ball
    ChangeColor(Color),
}

/// Everything the simulation consumes, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Input(InputEvent),
    /// Advance one frame
    Tick,
}

impl From<InputEvent> for SimEvent {
    fn from(input: InputEvent) -> Self {
        SimEvent::Input(input)
    }
}

/// FIFO shared by the input source and the frame driver
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<SimEvent>) {
        self.events.push_back(event.into());
    }

    pub fn tick(&mut self) {
        self.events.push_back(SimEvent::Tick);
    }

    pub fn pop(&mut self) -> Option<SimEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Advance all balls by one frame.
///
/// The held ball (if any) sits at `pin` and skips integration and walls; it
/// still takes part in pair resolution. Returns the number of colliding pairs.
pub fn step(balls: &mut BallRegistry, arena: &Arena, pin: Option<DVec2>) -> usize {
    move_balls(balls, arena, pin);
    collide_balls(balls)
}

/// Integrate and bounce off walls. A flagged ball only stays put while there
/// is a `pin` to hold it at.
pub fn move_balls(balls: &mut BallRegistry, arena: &Arena, pin: Option<DVec2>) {
    for ball in balls.as_mut_slice() {
        if let (true, Some(pin)) = (ball.dragging, pin) {
            ball.pos = pin;
            continue;
        }
        let (pos, vel) = resolve_boundary(ball.pos + ball.vel, ball.vel, ball.radius, arena);
        ball.pos = pos;
        ball.vel = vel;
    }
}

fn collide_balls(balls: &mut BallRegistry) -> usize {
    let mut bodies: Vec<Body> = balls
        .iter()
        .map(|b| Body::new(b.pos, b.vel, b.radius))
        .collect();
    let hits = resolve_all_pairs(&mut bodies);
    if hits > 0 {
        for (ball, body) in balls.as_mut_slice().iter_mut().zip(&bodies) {
            ball.pos = body.pos;
            ball.vel = body.vel;
        }
        log::trace!("Resolved {hits} colliding pairs");
    }
    hits
}

/// The whole simulation: arena, balls, drag input and frame counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    arena: Arena,
    balls: BallRegistry,
    drag: DragController,
    /// Seed the initial layout was drawn from, if it was generated
    rng_state: Option<RngState>,
    frame: u64,
}

impl Simulation {
    /// Build a simulation with a random non-overlapping layout
    pub fn new(config: &SimConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let rng_state = RngState::new(seed);
        let balls = generate_balls(config, &mut rng_state.to_rng())?;
        log::info!(
            "Simulation ready: {} balls in {}x{} arena (seed {})",
            balls.len(),
            config.arena_width,
            config.arena_height,
            seed
        );
        Ok(Self {
            arena: Arena::new(config.arena_width, config.arena_height),
            balls,
            drag: DragController::new(),
            rng_state: Some(rng_state),
            frame: 0,
        })
    }

    /// Build around a caller-supplied ball set.
    ///
    /// Nothing is held yet, so any `dragging` flags are cleared.
    pub fn with_balls(arena: Arena, mut balls: BallRegistry) -> Self {
        for ball in balls.as_mut_slice() {
            ball.dragging = false;
        }
        Self {
            arena,
            balls,
            drag: DragController::new(),
            rng_state: None,
            frame: 0,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn balls(&self) -> &BallRegistry {
        &self.balls
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selected(&self) -> Option<BallId> {
        self.drag.selected()
    }

    /// Layout seed; `None` for caller-supplied balls
    pub fn seed(&self) -> Option<u64> {
        self.rng_state.as_ref().map(|r| r.seed)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pointer_down(&mut self, point: DVec2) -> Option<BallId> {
        self.drag.pointer_down(&mut self.balls, point)
    }

    pub fn pointer_up(&mut self, point: DVec2) -> Option<DVec2> {
        self.drag.pointer_up(&mut self.balls, point)
    }

    pub fn change_color(&mut self, color: Color) -> bool {
        self.drag.change_color(&mut self.balls, color)
    }

    /// Advance one frame
    pub fn tick(&mut self) -> usize {
        self.frame += 1;
        step(&mut self.balls, &self.arena, self.drag.pin_position())
    }

    /// Apply one event to completion
    pub fn handle(&mut self, event: SimEvent) {
        match event {
            SimEvent::Input(InputEvent::PointerDown(p)) => {
                self.pointer_down(p);
            }
            SimEvent::Input(InputEvent::PointerUp(p)) => {
                self.pointer_up(p);
            }
            SimEvent::Input(InputEvent::ChangeColor(color)) => {
                if !self.change_color(color) {
                    log::debug!("Color change to {color} ignored: nothing selected");
                }
            }
            SimEvent::Tick => {
                self.tick();
            }
        }
    }

    /// Drain the queue in order. Returns how many frames were advanced.
    pub fn pump(&mut self, queue: &mut EventQueue) -> u64 {
        let start = self.frame;
        if !queue.is_empty() {
            log::trace!("Draining {} queued events", queue.len());
        }
        while let Some(event) = queue.pop() {
            self.handle(event);
        }
        self.frame - start
    }

    /// Read-only view for renderers and UI
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.frame, &self.balls, self.drag.selected())
    }
}
