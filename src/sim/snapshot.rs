//! Read-only per-frame output for renderers and UI

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::Serialize;

use super::state::{Ball, BallId, BallRegistry, Color};

/// What a renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub id: BallId,
    pub pos: DVec2,
    pub radius: f64,
    pub color: Color,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color,
        }
    }
}

/// One ball as a GPU instance record
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl From<&BallView> for BallInstance {
    fn from(view: &BallView) -> Self {
        Self {
            center: view.pos.as_vec2().to_array(),
            radius: view.radius as f32,
            _pad: 0.0,
            color: view.color.to_rgba(),
        }
    }
}

/// All balls at the end of a frame, plus the UI selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub balls: Vec<BallView>,
    /// Ball a color picker should target, if any
    pub selected: Option<BallId>,
}

impl Snapshot {
    pub fn capture(frame: u64, balls: &BallRegistry, selected: Option<BallId>) -> Self {
        Self {
            frame,
            balls: balls.iter().map(BallView::from).collect(),
            selected,
        }
    }

    /// Instance data ready for upload
    pub fn instances(&self) -> Vec<BallInstance> {
        self.balls.iter().map(BallInstance::from).collect()
    }

    /// Raw bytes of [`Snapshot::instances`]
    pub fn instance_bytes(&self) -> Vec<u8> {
        let instances = self.instances();
        bytemuck::cast_slice::<BallInstance, u8>(instances.as_slice()).to_vec()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BallRegistry {
        let mut balls = BallRegistry::new();
        balls.spawn(DVec2::new(10.5, 20.25), 5.0, Color::rgb(255, 0, 0));
        balls.spawn(DVec2::new(100.0, 50.0), 8.0, Color::rgb(0, 0, 255));
        balls
    }

    #[test]
    fn test_capture_keeps_registry_order() {
        let snap = Snapshot::capture(7, &registry(), Some(BallId(1)));
        assert_eq!(snap.frame, 7);
        assert_eq!(snap.balls.len(), 2);
        assert_eq!(snap.balls[0].id, BallId(0));
        assert_eq!(snap.balls[1].pos, DVec2::new(100.0, 50.0));
        assert_eq!(snap.selected, Some(BallId(1)));
    }

    #[test]
    fn test_instances_layout() {
        let snap = Snapshot::capture(0, &registry(), None);
        let instances = snap.instances();
        assert_eq!(instances[0].center, [10.5, 20.25]);
        assert_eq!(instances[0].radius, 5.0);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.0, 1.0]);

        assert_eq!(std::mem::size_of::<BallInstance>(), 32);
        assert_eq!(snap.instance_bytes().len(), 64);
    }

    #[test]
    fn test_json_output() {
        let snap = Snapshot::capture(3, &registry(), None);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"frame\":3"));
        assert!(json.contains("rgb(0, 0, 255)"));
        assert!(json.contains("\"selected\":null"));
    }
}
