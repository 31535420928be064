//! Point-pair primitives shared by the metric extractor.

use crate::error::{Error, Result};
use crate::types::Point;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: &Point, q: &Point) -> f64 {
    p.distance(q)
}

/// Angle at `vertex` subtended by `p` and `q`, in degrees within [0, 180].
///
/// Computed with the law of cosines on the triangle (p, vertex, q). Returns
/// `NaN` when either side adjacent to the vertex has zero length, so callers
/// receive an undefined value instead of a panic.
pub fn angle(p: &Point, vertex: &Point, q: &Point) -> f64 {
    let a = distance(vertex, q);
    let b = distance(p, q);
    let c = distance(p, vertex);
    if a == 0.0 || c == 0.0 {
        return f64::NAN;
    }

    // Rounding can push collinear triangles just outside acos' domain.
    let cos = ((a * a + c * c - b * b) / (2.0 * a * c)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Like [`angle`], but reports a degenerate triangle as an error.
pub fn checked_angle(p: &Point, vertex: &Point, q: &Point) -> Result<f64> {
    let deg = angle(p, vertex, q);
    if deg.is_nan() {
        return Err(Error::DegenerateGeometry(
            "angle vertex coincides with one of its arms",
        ));
    }
    Ok(deg)
}

/// Signed angle of the directed line `from -> to` against the +x axis, in degrees.
#[inline]
pub fn line_angle(from: &Point, to: &Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn right_angle() {
        let deg = angle(
            &Point::new(10.0, 0.0),
            &Point::new(0.0, 0.0),
            &Point::new(0.0, 5.0),
        );
        assert_abs_diff_eq!(deg, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn equilateral_triangle() {
        let deg = angle(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 3f64.sqrt()),
            &Point::new(2.0, 0.0),
        );
        assert_abs_diff_eq!(deg, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_stay_in_domain() {
        let straight = angle(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(3.0, 3.0),
        );
        // acos is ill-conditioned at cos = ±1, so collinear angles are only
        // accurate to a few micro-degrees.
        assert_abs_diff_eq!(straight, 180.0, epsilon = 1e-4);

        let folded = angle(
            &Point::new(3.0, 3.0),
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
        );
        assert_abs_diff_eq!(folded, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_triangle_is_undefined() {
        let p = Point::new(4.0, 4.0);
        let q = Point::new(9.0, 1.0);
        assert!(angle(&p, &p, &q).is_nan());
        assert!(angle(&q, &p, &p).is_nan());
        assert!(matches!(
            checked_angle(&p, &p, &q),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn line_angle_sign() {
        let origin = Point::zero();
        assert_abs_diff_eq!(line_angle(&origin, &Point::new(1.0, 1.0)), 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(line_angle(&origin, &Point::new(1.0, -1.0)), -45.0, epsilon = 1e-9);
    }
}
