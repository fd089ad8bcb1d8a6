use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Squared length below which `velocity × up` is treated as degenerate
/// and the previous spin is kept.
const SPIN_DEGENERATE_EPSILON: f32 = 1e-6;

/// Kinematic state of the single ball.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit axis of the cosmetic roll.
    pub spin_axis: Vec3,
    /// Cosmetic roll rate in rad/s.
    pub spin_speed: f32,
    /// Accumulated visual orientation. Never feeds back into the trajectory.
    pub orientation: Quat,
    pub airborne: bool,
    pub scored_this_flight: bool,
}

impl BallState {
    /// A grounded, motionless ball at `position`.
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin_axis: Vec3::X,
            spin_speed: 0.0,
            orientation: Quat::IDENTITY,
            airborne: false,
            scored_this_flight: false,
        }
    }

    /// Advance one fixed step under gravity (semi-implicit Euler) and
    /// refresh the cosmetic spin. No-op while grounded.
    pub fn integrate(&mut self, dt: f32, gravity: Vec3, ball_radius: f32) {
        if !self.airborne {
            return;
        }

        self.velocity += gravity * dt;
        self.position += self.velocity * dt;

        let tmp = self.velocity.cross(Vec3::Y);
        if tmp.length_squared() > SPIN_DEGENERATE_EPSILON {
            self.spin_axis = tmp.normalize();
            self.spin_speed = self.velocity.length() / ball_radius;
        }

        self.roll(dt);
    }

    /// Apply the cosmetic roll for `dt` seconds.
    fn roll(&mut self, dt: f32) {
        if !self.spin_axis.is_normalized() || self.spin_speed == 0.0 {
            return;
        }
        let delta = Quat::from_axis_angle(self.spin_axis, self.spin_speed * dt);
        self.orientation = (delta * self.orientation).normalize();
    }

    /// End the flight: drop to `rest_height`, zero the velocity, stop spinning.
    pub fn land(&mut self, rest_height: f32) {
        self.airborne = false;
        self.position.y = rest_height;
        self.velocity = Vec3::ZERO;
        self.spin_speed = 0.0;
    }
}
