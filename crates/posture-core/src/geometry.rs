use posture_base::Vec2;

/// A point in frame pixels.
pub type Point2 = Vec2<f32>;

/// Keeps `angle` finite when a ray has zero length.
const EPSILON: f32 = 1e-6;

/// Angle in degrees at vertex `b` between the rays `b -> a` and `b -> c`.
///
/// Always in [0, 180]. Coincident points give a finite value instead of NaN.
pub fn angle(a: Point2, b: Point2, c: Point2) -> f32 {
    let ba = a - b;
    let bc = c - b;
    let cosine = ba.dot(bc) / (ba.length() * bc.length() + EPSILON);
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Angle in degrees of the line `from -> to` against the positive x axis,
/// `atan2(dy, dx)`. Image y grows downwards, so a point above `from` gives a
/// negative angle.
pub fn line_angle(from: Point2, to: Point2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!((angle(a, b, c) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_straight_and_folded() {
        let b = Point2::new(5.0, 5.0);
        // EPSILON in the denominator keeps a straight angle slightly under 180.
        let straight = angle(Point2::new(0.0, 5.0), b, Point2::new(10.0, 5.0));
        assert!(straight < 180.0 && (straight - 180.0).abs() < 0.05, "straight {straight}");
        assert!(angle(Point2::new(10.0, 5.0), b, Point2::new(20.0, 5.0)).abs() < 1e-1);
    }

    #[test]
    fn test_line_angle_quadrants() {
        let o = Point2::new(0.0, 0.0);
        assert_eq!(line_angle(o, Point2::new(1.0, 0.0)), 0.0);
        assert!((line_angle(o, Point2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((line_angle(o, Point2::new(0.0, -1.0)) + 90.0).abs() < 1e-4);
        assert!((line_angle(o, Point2::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
    }
}
