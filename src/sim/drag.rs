//! Drag-to-shoot input handling
//!
//! Pointer-down over a ball grabs it; pointer-up releases it with a velocity
//! proportional to how far the pointer travelled in between. There is no
//! pointer-move handling: while held, a ball stays pinned at the spot where
//! it was grabbed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{BallId, BallRegistry, Color};
use crate::consts::DRAG_VELOCITY_SCALE;

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub ball: BallId,
    /// Pointer position at pointer-down
    pub start: DVec2,
}

/// Drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Turns pointer events into registry mutations and tracks the selected ball
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragController {
    state: DragState,
    /// Last ball picked; outlives the drag so a color picker can target it
    selected: Option<BallId>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn selected(&self) -> Option<BallId> {
        self.selected
    }

    /// Where a held ball is pinned this frame
    pub fn pin_position(&self) -> Option<DVec2> {
        self.session().map(|s| s.start)
    }

    /// Handle pointer-down at `point`.
    ///
    /// While idle, grabs the first ball (registry order) under the pointer and
    /// returns its id; a miss clears the selection. Ignored while a drag is
    /// already active.
    pub fn pointer_down(&mut self, balls: &mut BallRegistry, point: DVec2) -> Option<BallId> {
        if let DragState::Dragging(session) = self.state {
            log::debug!(
                "Pointer down at ({:.1}, {:.1}) ignored: {} is still held",
                point.x,
                point.y,
                session.ball
            );
            return None;
        }

        let hit = balls.hit_test(point);
        self.selected = hit;
        let id = hit?;
        if let Some(ball) = balls.get_mut(id) {
            ball.dragging = true;
        }
        self.state = DragState::Dragging(DragSession { ball: id, start: point });
        log::debug!("Grabbed {} at ({:.1}, {:.1})", id, point.x, point.y);
        Some(id)
    }

    /// Handle pointer-up at `point`.
    ///
    /// Releases the held ball with velocity `DRAG_VELOCITY_SCALE * (point - start)`
    /// and returns that velocity. No-op while idle.
    pub fn pointer_up(&mut self, balls: &mut BallRegistry, point: DVec2) -> Option<DVec2> {
        let DragState::Dragging(session) = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        let velocity = (point - session.start) * DRAG_VELOCITY_SCALE;
        let ball = balls.get_mut(session.ball)?;
        ball.vel = velocity;
        ball.dragging = false;
        log::debug!(
            "Released {} with velocity ({:.2}, {:.2})",
            session.ball,
            velocity.x,
            velocity.y
        );
        Some(velocity)
    }

    /// Recolor the selected ball. Returns false if nothing is selected.
    pub fn change_color(&self, balls: &mut BallRegistry, color: Color) -> bool {
        let Some(ball) = self.selected.and_then(|id| balls.get_mut(id)) else {
            return false;
        };
        ball.color = color;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> (BallRegistry, BallId, BallId) {
        let mut balls = BallRegistry::new();
        let a = balls.spawn(DVec2::new(100.0, 100.0), 20.0, Color::WHITE);
        let b = balls.spawn(DVec2::new(300.0, 200.0), 20.0, Color::WHITE);
        (balls, a, b)
    }

    #[test]
    fn test_pointer_down_selects_ball_under_cursor() {
        let (mut balls, a, _) = registry();
        let mut drag = DragController::new();

        assert_eq!(drag.pointer_down(&mut balls, DVec2::new(110.0, 95.0)), Some(a));
        assert!(drag.is_dragging());
        assert_eq!(drag.selected(), Some(a));
        assert!(balls.get(a).is_some_and(|b| b.dragging));
        assert_eq!(drag.pin_position(), Some(DVec2::new(110.0, 95.0)));
    }

    #[test]
    fn test_pointer_down_miss_stays_idle() {
        let (mut balls, _, _) = registry();
        let mut drag = DragController::new();

        assert_eq!(drag.pointer_down(&mut balls, DVec2::new(600.0, 500.0)), None);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.selected(), None);
        assert!(balls.iter().all(|b| !b.dragging));
    }

    #[test]
    fn test_release_velocity_scales_drag_vector() {
        let (mut balls, a, _) = registry();
        let mut drag = DragController::new();

        drag.pointer_down(&mut balls, DVec2::new(100.0, 100.0));
        let vel = drag.pointer_up(&mut balls, DVec2::new(150.0, 130.0));

        assert_eq!(vel, Some(DVec2::new(5.0, 3.0)));
        let ball = balls.get(a).unwrap();
        assert_eq!(ball.vel, DVec2::new(5.0, 3.0));
        assert!(!ball.dragging);
        assert_eq!(drag.state(), DragState::Idle);
        // Selection survives the release
        assert_eq!(drag.selected(), Some(a));
    }

    #[test]
    fn test_release_outside_arena_is_accepted() {
        let (mut balls, a, _) = registry();
        let mut drag = DragController::new();

        drag.pointer_down(&mut balls, DVec2::new(100.0, 100.0));
        let vel = drag.pointer_up(&mut balls, DVec2::new(-900.0, 100.0));
        assert_eq!(vel, Some(DVec2::new(-100.0, 0.0)));
        assert_eq!(balls.get(a).unwrap().vel, DVec2::new(-100.0, 0.0));
    }

    #[test]
    fn test_pointer_down_while_dragging_is_ignored() {
        let (mut balls, a, b) = registry();
        let mut drag = DragController::new();

        drag.pointer_down(&mut balls, DVec2::new(100.0, 100.0));
        assert_eq!(drag.pointer_down(&mut balls, DVec2::new(300.0, 200.0)), None);
        assert_eq!(drag.session().map(|s| s.ball), Some(a));
        assert!(!balls.get(b).unwrap().dragging);
        assert_eq!(drag.selected(), Some(a));
    }

    #[test]
    fn test_pointer_up_while_idle_is_noop() {
        let (mut balls, _, _) = registry();
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_up(&mut balls, DVec2::new(10.0, 10.0)), None);
        assert!(balls.iter().all(|b| b.vel == DVec2::ZERO));
    }

    #[test]
    fn test_change_color_targets_selection() {
        let (mut balls, a, b) = registry();
        let mut drag = DragController::new();
        let red = Color::rgb(255, 0, 0);

        assert!(!drag.change_color(&mut balls, red));

        drag.pointer_down(&mut balls, DVec2::new(300.0, 200.0));
        drag.pointer_up(&mut balls, DVec2::new(300.0, 200.0));
        assert!(drag.change_color(&mut balls, red));
        assert_eq!(balls.get(b).unwrap().color, red);
        assert_eq!(balls.get(a).unwrap().color, Color::WHITE);
        // Physics untouched
        assert_eq!(balls.get(b).unwrap().vel, DVec2::ZERO);
    }

    #[test]
    fn test_missed_click_clears_selection() {
        let (mut balls, a, _) = registry();
        let mut drag = DragController::new();

        drag.pointer_down(&mut balls, DVec2::new(100.0, 100.0));
        drag.pointer_up(&mut balls, DVec2::new(100.0, 100.0));
        assert_eq!(drag.selected(), Some(a));

        drag.pointer_down(&mut balls, DVec2::new(700.0, 500.0));
        assert_eq!(drag.selected(), None);
        assert!(!drag.change_color(&mut balls, Color::rgb(0, 0, 255)));
    }
}
