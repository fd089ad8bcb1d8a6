use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::court::{CourtConfig, planar_distance};
use crate::physics::BallState;

/// Thresholds of the made-basket heuristic, tuned from play rather than
/// derived from physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points for any made basket.
    pub base_points: i32,
    /// The ball center must be within `rim_radius - ball_radius * inner_radius_factor`
    /// of the rim center horizontally.
    pub inner_radius_factor: f32,
    /// Maximum angle between the velocity and straight down, in degrees.
    pub max_descent_angle_deg: f32,
    /// Shots taken below this power never score.
    pub min_power: f32,
    /// Minimum ball speed at the rim.
    pub min_speed: f32,
    /// Maximum sideways (x) speed at the rim.
    pub max_lateral_speed: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: 2,
            inner_radius_factor: 1.5,
            max_descent_angle_deg: 45.0,
            min_power: 0.3,
            min_speed: 8.0,
            max_lateral_speed: 10.0,
        }
    }
}

/// Whether the ball is dropping cleanly through the rim at `rim_center`.
///
/// Never true for a grounded ball or one that already scored this flight.
pub fn is_score(
    ball: &BallState,
    rim_center: Vec3,
    shot_power: f32,
    court: &CourtConfig,
    scoring: &ScoringConfig,
) -> bool {
    if !ball.airborne || ball.scored_this_flight {
        return false;
    }

    let v = ball.velocity;
    let descending = v.y < 0.0;
    let at_rim_plane = ball.position.y < court.rim_height + court.ball_radius;
    let inside_ring = planar_distance(ball.position, rim_center)
        < court.rim_radius - court.ball_radius * scoring.inner_radius_factor;
    let committed = shot_power > scoring.min_power
        && v.length() > scoring.min_speed
        && v.x.abs() < scoring.max_lateral_speed;

    // Angle check last: it is meaningless for a zero velocity.
    descending
        && at_rim_plane
        && inside_ring
        && committed
        && v.angle_between(Vec3::NEG_Y) < scoring.max_descent_angle_deg.to_radians()
}

/// Points awarded for one made basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAward {
    pub base: i32,
    /// Combo streak after this make.
    pub streak: u32,
    /// Extra points for the streak; zero unless the streak exceeds one.
    pub bonus: i32,
}

impl ScoreAward {
    pub fn total(&self) -> i32 {
        self.base + self.bonus
    }

    pub fn is_combo(&self) -> bool {
        self.bonus > 0
    }
}

/// Running shooting statistics. Survives resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub attempts: u32,
    pub makes: u32,
    pub score: i32,
    /// Consecutive makes with no missed flight in between.
    pub combo: u32,
}

impl SessionStats {
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Count a make: base points plus a bonus equal to the new streak once
    /// the streak exceeds one.
    pub fn record_make(&mut self, scoring: &ScoringConfig) -> ScoreAward {
        self.makes += 1;
        self.combo += 1;
        let bonus = if self.combo > 1 { self.combo as i32 } else { 0 };
        let award = ScoreAward {
            base: scoring.base_points,
            streak: self.combo,
            bonus,
        };
        self.score += award.total();
        award
    }

    /// A flight ended without scoring: the streak is broken.
    pub fn record_miss(&mut self) {
        self.combo = 0;
    }

    /// Makes as a percentage of attempts; zero before the first attempt.
    pub fn accuracy_pct(&self) -> f32 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.makes as f32 / self.attempts as f32 * 100.0
    }
}
