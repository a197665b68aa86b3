use ncollide2d::na::{Point2, RealField};

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

/// Distance of `test` from the infinite line through `a` and `b`. If `a` and `b` coincide the
/// plain distance to `a` is returned.
pub fn deviation(a: &Point2<f64>, b: &Point2<f64>, test: &Point2<f64>) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len <= f64::EPSILON {
        return dist(a, test);
    }

    let v = test - a;
    (d.x * v.y - d.y * v.x).abs() / len
}
