use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::court::{CourtConfig, HoopSide, planar_distance};
use crate::physics::BallState;

/// Vertical rebound speed below which a floor bounce ends the flight.
pub const SETTLE_SPEED: f32 = 1.0;
/// Outward push applied after a rim contact so the ball does not stick.
const RIM_NUDGE: f32 = 0.01;
/// Half height of the backboard contact window around the rim plane.
const BACKBOARD_HALF_HEIGHT: f32 = 1.0;

/// A surface the ball touched during one resolver pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Floor,
    Backboard,
    Rim,
}

/// Why a flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightEnd {
    /// Bounced too low to continue.
    Settled,
    /// Left the court past a baseline.
    OffCourt,
    /// Exceeded the flight watchdog.
    TimedOut,
}

/// What happened during one resolver pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub contacts: Vec<Contact>,
    pub flight_end: Option<FlightEnd>,
}

/// Resolve contacts for one tick, in the fixed order floor, backboard, rim,
/// then the off-court check.
///
/// A floor stop ends the pass immediately; the remaining checks never run
/// against a ball that has already landed.
pub fn resolve(ball: &mut BallState, hoop: HoopSide, court: &CourtConfig) -> CollisionReport {
    let mut report = CollisionReport::default();
    if !ball.airborne {
        return report;
    }

    if collide_floor(ball, court) {
        report.contacts.push(Contact::Floor);
        if ball.velocity.y.abs() < SETTLE_SPEED {
            ball.land(court.rest_height());
            report.flight_end = Some(FlightEnd::Settled);
            tracing::debug!(x = ball.position.x, z = ball.position.z, "Ball settled");
            return report;
        }
    }

    if collide_backboard(ball, hoop, court) {
        report.contacts.push(Contact::Backboard);
    }

    if collide_rim(ball, hoop, court) {
        report.contacts.push(Contact::Rim);
    }

    if court.is_off_court(ball.position.z) {
        tracing::debug!(z = ball.position.z, "Ball left the court");
        ball.land(court.rest_height());
        report.flight_end = Some(FlightEnd::OffCourt);
    }

    report
}

fn collide_floor(ball: &mut BallState, court: &CourtConfig) -> bool {
    let floor = court.rest_height();
    if ball.position.y > floor {
        return false;
    }
    ball.position.y = floor;
    ball.velocity.y = -ball.velocity.y * court.restitution;
    true
}

/// Reflects off the board plane, but only while the ball is heading into it;
/// a ball already moving away is left alone.
fn collide_backboard(ball: &mut BallState, hoop: HoopSide, court: &CourtConfig) -> bool {
    let plane_z = court.backboard_z(hoop);
    if (ball.position.z - plane_z).abs() >= court.ball_radius {
        return false;
    }
    let y = ball.position.y;
    if y < court.rim_height - BACKBOARD_HALF_HEIGHT || y > court.rim_height + BACKBOARD_HALF_HEIGHT {
        return false;
    }
    // Only reflect while heading into the board.
    if ball.velocity.z * hoop.sign() <= 0.0 {
        return false;
    }
    ball.velocity.z = -ball.velocity.z * court.restitution;
    true
}

fn collide_rim(ball: &mut BallState, hoop: HoopSide, court: &CourtConfig) -> bool {
    let rim = court.rim_center(hoop);
    let dist_xz = planar_distance(ball.position, rim);
    let inner = court.rim_radius - court.rim_thickness;
    let outer = court.rim_radius + court.rim_thickness;
    if dist_xz < inner || dist_xz > outer {
        return false;
    }
    if ball.position.y >= court.rim_height + court.ball_radius {
        return false;
    }

    // No radial direction at the exact rim axis, only reachable when
    // rim_thickness >= rim_radius.
    let Some(normal) =
        Vec3::new(ball.position.x - rim.x, 0.0, ball.position.z - rim.z).try_normalize()
    else {
        return false;
    };
    let approach = ball.velocity.dot(normal);
    if approach >= 0.0 {
        return false;
    }

    let horizontal = Vec3::new(ball.velocity.x, 0.0, ball.velocity.z);
    let reflected = (horizontal - 2.0 * approach * normal) * court.restitution;
    ball.velocity.x = reflected.x;
    ball.velocity.z = reflected.z;
    ball.position += normal * RIM_NUDGE;
    true
}
