use ncollide2d::bounding_volume::AABB;
use ncollide2d::na::{Point2, RealField};

/// Computes the axis aligned bounding box of a set of points, or `None` if the slice is empty.
/// Non-finite coordinates are not filtered and will poison the result.
pub fn aabb_of_points<N: RealField + Copy>(points: &[Point2<N>]) -> Option<AABB<N>> {
    let first = points.first()?;
    let mut mins = *first;
    let mut maxs = *first;
    for p in points.iter().skip(1) {
        mins.x = mins.x.min(p.x);
        mins.y = mins.y.min(p.y);
        maxs.x = maxs.x.max(p.x);
        maxs.y = maxs.y.max(p.y);
    }

    Some(AABB::new(mins, maxs))
}

/// Width and height of an AABB
pub fn aabb_extents<N: RealField + Copy>(b: &AABB<N>) -> (N, N) {
    (b.maxs.x - b.mins.x, b.maxs.y - b.mins.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_has_no_box() {
        let points: Vec<Point2<f64>> = Vec::new();
        assert!(aabb_of_points(&points).is_none());
    }

    #[test]
    fn test_box_of_polyline() {
        let b = aabb_of_points(&sample_polyline()).unwrap();
        assert_relative_eq!(-7.8, b.mins.x, epsilon = 1e-12);
        assert_relative_eq!(-7.2, b.mins.y, epsilon = 1e-12);
        assert_relative_eq!(5.0, b.maxs.x, epsilon = 1e-12);
        assert_relative_eq!(6.4, b.maxs.y, epsilon = 1e-12);

        let (dx, dy) = aabb_extents(&b);
        assert_relative_eq!(12.8, dx, epsilon = 1e-12);
        assert_relative_eq!(13.6, dy, epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let b = aabb_of_points(&[Point2::new(1.0, 2.0)]).unwrap();
        let (dx, dy) = aabb_extents(&b);
        assert_eq!(0.0, dx);
        assert_eq!(0.0, dy);
    }

    fn sample_polyline() -> Vec<Point2<f64>> {
        vec![
            Point2::new(5.0, 0.0),
            Point2::new(3.5, 0.9),
            Point2::new(4.0, 2.3),
            Point2::new(3.3, 3.3),
            Point2::new(2.7, 4.7),
            Point2::new(1.7, 6.4),
            Point2::new(0.0, 5.9),
            Point2::new(-1.5, 5.7),
            Point2::new(-3.7, 6.4),
            Point2::new(-5.3, 5.3),
            Point2::new(-6.4, 3.7),
            Point2::new(-7.1, 1.9),
            Point2::new(-7.3, 0.0),
            Point2::new(-7.8, -2.1),
            Point2::new(-6.3, -3.7),
            Point2::new(-5.7, -5.7),
            Point2::new(-3.7, -6.3),
            Point2::new(-1.7, -6.2),
            Point2::new(-0.0, -7.2),
            Point2::new(1.5, -5.6),
            Point2::new(2.4, -4.2),
            Point2::new(3.9, -3.9),
            Point2::new(4.9, -2.9),
            Point2::new(4.9, -1.3),
            Point2::new(5.0, 0.0),
        ]
    }
}
