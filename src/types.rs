use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of points in the iBUG 68-point facial landmark layout.
pub const NUM_LANDMARKS: usize = 68;

/// A 2D point in image pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(alias = "_x")]
    pub x: f64,
    #[serde(alias = "_y")]
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let d = *self - *other;
        (d.x * d.x + d.y * d.y).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        (*self + *other) * 0.5
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Named indices into the 68-point layout.
///
/// "Left" and "right" are as seen in the image, so the left eye (36-41) is
/// the subject's right eye.
pub mod landmarks {
    pub const JAW_LEFT: usize = 0;
    pub const JAW_RAMUS_LEFT: usize = 2;
    pub const JAW_UPPER_LEFT: usize = 3;
    pub const GONION_LEFT: usize = 4;
    pub const CHIN_LEFT: usize = 6;
    pub const MENTON: usize = 8;
    pub const CHIN_RIGHT: usize = 10;
    pub const GONION_RIGHT: usize = 12;
    pub const JAW_UPPER_RIGHT: usize = 13;
    pub const JAW_RIGHT: usize = 16;

    pub const BROW_LEFT_PEAK: usize = 19;
    pub const BROW_RIGHT_PEAK: usize = 24;

    pub const NASION: usize = 27;
    pub const NOSE_LEFT: usize = 31;
    pub const SUBNASALE: usize = 33;
    pub const NOSE_RIGHT: usize = 35;

    pub const LEFT_EYE_OUTER: usize = 36;
    pub const LEFT_EYE_INNER: usize = 39;
    pub const RIGHT_EYE_INNER: usize = 42;
    pub const RIGHT_EYE_OUTER: usize = 45;

    pub const MOUTH_LEFT: usize = 48;
    pub const UPPER_LIP_CENTER: usize = 51;
    pub const MOUTH_RIGHT: usize = 54;
    pub const LOWER_LIP_CENTER: usize = 57;
}

/// Index of the bilateral counterpart of landmark `idx` (midline points map to themselves).
pub const fn mirror_index(idx: usize) -> usize {
    match idx {
        0..=16 => 16 - idx,
        17..=26 => 43 - idx,
        27..=30 => idx,
        31..=35 => 66 - idx,
        36..=39 | 42..=45 => 81 - idx,
        40..=41 | 46..=47 => 87 - idx,
        48..=54 => 102 - idx,
        55..=59 => 114 - idx,
        60..=64 => 124 - idx,
        65..=67 => 132 - idx,
        _ => idx,
    }
}

/// Exactly 68 facial landmarks in the iBUG ordering.
///
/// The fixed-size storage makes the cardinality a type-level guarantee; every
/// constructor that accepts a dynamically sized input rejects anything other
/// than 68 points with [`Error::InvalidLandmarkCount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LandmarkInput", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: [Point; NUM_LANDMARKS],
}

impl LandmarkSet {
    pub const fn new(points: [Point; NUM_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Build from a slice, validating that it holds exactly 68 points.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let points: [Point; NUM_LANDMARKS] =
            points.try_into().map_err(|_| Error::InvalidLandmarkCount {
                expected: NUM_LANDMARKS,
                actual: points.len(),
            })?;
        Ok(Self { points })
    }

    /// Parse landmarks from JSON: a bare point array or `{"positions": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let input: LandmarkInput = serde_json::from_str(json)?;
        Self::try_from(input)
    }

    pub fn points(&self) -> &[Point; NUM_LANDMARKS] {
        &self.points
    }

    /// Apply `f` to every point, keeping the index layout.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        Self {
            points: std::array::from_fn(|i| f(self.points[i])),
        }
    }

    /// Flip the face horizontally about the vertical line `x = axis_x`.
    ///
    /// Bilateral landmarks swap indices so the result is again a valid
    /// 68-point layout.
    pub fn mirrored(&self, axis_x: f64) -> Self {
        Self {
            points: std::array::from_fn(|i| {
                let p = self.points[mirror_index(i)];
                Point::new(2.0 * axis_x - p.x, p.y)
            }),
        }
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::from_points(&points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points.to_vec()
    }
}

/// Accepted JSON shapes for landmark input.
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkInput {
    Points(Vec<Point>),
    Detection { positions: Vec<Point> },
}

impl TryFrom<LandmarkInput> for LandmarkSet {
    type Error = Error;

    fn try_from(input: LandmarkInput) -> Result<Self> {
        match input {
            LandmarkInput::Points(points) | LandmarkInput::Detection { positions: points } => {
                Self::from_points(&points)
            }
        }
    }
}
