use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which end of the court a hoop stands at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoopSide {
    /// Hoop at the negative-z baseline.
    Left,
    /// Hoop at the positive-z baseline.
    Right,
}

impl HoopSide {
    /// Both hoops in candidate order. Ties in hoop selection go to the first.
    pub const ALL: [HoopSide; 2] = [HoopSide::Left, HoopSide::Right];

    /// Sign of the z axis on this hoop's side of the court.
    pub fn sign(self) -> f32 {
        match self {
            HoopSide::Left => -1.0,
            HoopSide::Right => 1.0,
        }
    }
}

/// Spatial and material constants of the court, supplied once at startup.
///
/// The court's long axis is z: baselines sit at `z = ±half_length` and the
/// sidelines at `x = ±half_width`. `floor_height` is the playing surface; a
/// resting ball's center sits `ball_radius` above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    pub floor_height: f32,
    pub half_width: f32,
    pub half_length: f32,
    /// Height of the rim plane above the floor.
    pub rim_height: f32,
    /// Radius of the rim ring, center to iron.
    pub rim_radius: f32,
    /// Half thickness of the rim band used for side contact.
    pub rim_thickness: f32,
    /// Distance from the baseline in to the backboard plane.
    pub backboard_offset: f32,
    /// Distance from the backboard plane in to the rim center.
    pub rim_board_gap: f32,
    pub ball_radius: f32,
    /// Gravitational acceleration magnitude (units/s^2, applied downward).
    pub gravity: f32,
    /// Fraction of normal velocity kept (and reversed) after a bounce.
    pub restitution: f32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            floor_height: 0.0,
            half_width: 7.5,
            half_length: 15.0,
            rim_height: 3.05,
            rim_radius: 0.45,
            rim_thickness: 0.03,
            backboard_offset: 1.5,
            rim_board_gap: 0.6,
            ball_radius: 0.24,
            gravity: 9.8,
            restitution: 0.65,
        }
    }
}

impl CourtConfig {
    /// Height of the ball's center when it touches the floor.
    pub fn rest_height(&self) -> f32 {
        self.floor_height + self.ball_radius
    }

    /// Where the ball starts and returns to on reset.
    pub fn center_spot(&self) -> Vec3 {
        Vec3::new(0.0, self.rest_height(), 0.0)
    }

    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, -self.gravity, 0.0)
    }

    /// z coordinate of the backboard plane on `side`.
    pub fn backboard_z(&self, side: HoopSide) -> f32 {
        side.sign() * (self.half_length - self.backboard_offset)
    }

    /// Center of the rim ring on `side`.
    pub fn rim_center(&self, side: HoopSide) -> Vec3 {
        let z = side.sign() * (self.half_length - self.backboard_offset - self.rim_board_gap);
        Vec3::new(0.0, self.rim_height, z)
    }

    /// The hoop whose rim center is nearest to `position`.
    ///
    /// Equal distances resolve to [`HoopSide::Left`].
    pub fn nearest_hoop(&self, position: Vec3) -> HoopSide {
        let left = position.distance_squared(self.rim_center(HoopSide::Left));
        let right = position.distance_squared(self.rim_center(HoopSide::Right));
        if right < left {
            HoopSide::Right
        } else {
            HoopSide::Left
        }
    }

    /// Clamp a planar aim position to the court's half extents.
    pub fn clamp_to_court(&self, x: f32, z: f32) -> (f32, f32) {
        (
            x.clamp(-self.half_width, self.half_width),
            z.clamp(-self.half_length, self.half_length),
        )
    }

    /// Whether `z` lies past either baseline by more than one unit.
    pub fn is_off_court(&self, z: f32) -> bool {
        z.abs() > self.half_length + 1.0
    }
}

/// Horizontal (xz) distance between two points, ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
