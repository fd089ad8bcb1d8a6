use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::court::{CourtConfig, HoopSide};

/// Default shot power on startup and after a reset.
pub const DEFAULT_POWER: f32 = 0.5;

/// Tunables for turning aim state into a shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    /// Vertical lift added to the aim direction before normalizing, so every
    /// shot arcs regardless of horizontal distance.
    pub lift: f32,
    /// Launch speed at full power.
    pub max_speed: f32,
    /// Initial spin rate per unit of launch speed.
    pub spin_factor: f32,
    pub default_power: f32,
    pub power_step: f32,
    pub aim_step: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            lift: 3.0,
            max_speed: 25.0,
            spin_factor: 3.0,
            default_power: DEFAULT_POWER,
            power_step: 0.05,
            aim_step: 0.5,
        }
    }
}

/// Initial flight parameters produced by [`launch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub velocity: Vec3,
    pub spin_axis: Vec3,
    pub spin_speed: f32,
    pub hoop: HoopSide,
}

/// Aim at the nearer hoop and compute the launch velocity and spin.
///
/// `power` is clamped to `[0, 1]`. When the resulting velocity is zero the
/// spin axis falls back to `fallback_axis`.
pub fn launch(
    ball_position: Vec3,
    power: f32,
    court: &CourtConfig,
    shot: &ShotConfig,
    fallback_axis: Vec3,
) -> Launch {
    let hoop = court.nearest_hoop(ball_position);
    let mut direction = court.rim_center(hoop) - ball_position;
    direction.y += shot.lift;
    let direction = direction.normalize_or_zero();

    let speed = power.clamp(0.0, 1.0) * shot.max_speed;
    let velocity = direction * speed;

    let spin_axis = velocity
        .normalize_or_zero()
        .cross(Vec3::Y)
        .try_normalize()
        .unwrap_or(fallback_axis);

    Launch {
        velocity,
        spin_axis,
        spin_speed: velocity.length() * shot.spin_factor,
        hoop,
    }
}
