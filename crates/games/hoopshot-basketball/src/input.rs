use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Direction of a single aim nudge on the court plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimDirection {
    /// Toward -x.
    Left,
    /// Toward +x.
    Right,
    /// Toward -z.
    Forward,
    /// Toward +z.
    Back,
}

impl AimDirection {
    /// Unit (dx, dz) step for this direction.
    pub fn delta(self) -> (f32, f32) {
        match self {
            AimDirection::Left => (-1.0, 0.0),
            AimDirection::Right => (1.0, 0.0),
            AimDirection::Forward => (0.0, -1.0),
            AimDirection::Back => (0.0, 1.0),
        }
    }
}

/// Preset camera placements. All look at the court center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraView {
    #[default]
    Broadcast,
    TopDown,
    Side,
    Backboard,
}

impl CameraView {
    /// Eye position for this preset.
    pub fn eye(self) -> Vec3 {
        match self {
            CameraView::Broadcast => Vec3::new(30.0, 15.0, 0.0),
            CameraView::TopDown => Vec3::new(0.0, 25.0, 0.0),
            CameraView::Side => Vec3::new(20.0, 10.0, 0.0),
            CameraView::Backboard => Vec3::new(0.0, 8.0, -25.0),
        }
    }
}

/// A discrete player action, queued and applied before the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotAction {
    MoveAim(AimDirection),
    PowerUp,
    PowerDown,
    Shoot,
    Reset,
    SetView(CameraView),
    ToggleOrbit,
}

impl ShotAction {
    /// Actions that only apply while the ball is grounded.
    pub fn requires_grounded(&self) -> bool {
        matches!(
            self,
            ShotAction::MoveAim(_) | ShotAction::PowerUp | ShotAction::PowerDown | ShotAction::Shoot
        )
    }
}
