use crate::curvature::contour::Contour;
use crate::curvature::gradient::GradientField;
use ncollide2d::na::DMatrix;
use std::f64::consts::PI;
use tracing::trace;

/// Bend angle between two gradient vectors, folded into `[0, pi/2]` so that opposite pointing
/// gradients count as a small bend. Returns `None` if either vector has zero length.
pub fn bend_angle(g1: (f64, f64), g2: (f64, f64)) -> Option<f64> {
    let norms = g1.0.hypot(g1.1) * g2.0.hypot(g2.1);
    if norms == 0.0 || !norms.is_finite() {
        return None;
    }

    let cos = ((g1.0 * g2.0 + g1.1 * g2.1) / norms).clamp(-1.0, 1.0);
    let angle = cos.acos();
    Some(if cos < 0.0 { PI - angle } else { angle })
}

/// Builds a heatmap the size of the gradient field. For every contour index `i` the gradients at
/// points `i` and `i + n` are compared and the bend angle is written at point `i + n / 2`, with
/// all indices wrapping around the loop. Pixels not on a contour stay at zero.
pub fn curvature_heatmap(contours: &[Contour], field: &GradientField, n: usize) -> DMatrix<f64> {
    let (rows, cols) = field.shape();
    let mut heatmap = DMatrix::zeros(rows, cols);

    for contour in contours.iter() {
        let count = contour.len();
        for i in 0..count {
            let p1 = contour.points[i];
            let p2 = contour.points[(i + n) % count];
            let g1 = field.at(p1.y, p1.x);
            let g2 = field.at(p2.y, p2.x);

            match bend_angle((g1.x, g1.y), (g2.x, g2.y)) {
                Some(angle) => {
                    let c = contour.points[(i + n / 2) % count];
                    heatmap[(c.y, c.x)] = angle;
                }
                None => trace!(index = i, "zero gradient on contour, sample skipped"),
            }
        }
    }

    heatmap
}
