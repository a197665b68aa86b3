//! Resampling of a raw boundary loop to a fixed number of points.
//!
//! The loop is split at its leading edge into the suction and pressure sides. On each side the
//! tightly packed points around the leading edge are copied verbatim, since interpolating in x
//! there would flatten the nose, and the remainder is linearly interpolated onto a uniform x grid.

use crate::airfoil::{BoundaryPolyline, Side};
use crate::algorithms::{interp, linspace};
use crate::errors::{PipelineError, ResampleFailure, ResampleReason};
use crate::params::ResampleParams;
use ncollide2d::na::Point2;
use tracing::debug;

/// The result of resampling one boundary. Both sides are kept so that a closed outline can be
/// rebuilt for rasterization, while `points` holds the merged sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledPolyline {
    /// Suction side from the leading edge aft
    pub suction: Vec<Point2<f64>>,

    /// Pressure side from the leading edge aft
    pub pressure: Vec<Point2<f64>>,

    points: Vec<Point2<f64>>,
}

impl ResampledPolyline {
    /// The boundary untouched, used when it already has enough points
    fn passthrough(boundary: &BoundaryPolyline) -> Self {
        let (suction, pressure) = boundary.split();
        Self {
            suction: suction.points,
            pressure: pressure.points,
            points: boundary.points().to_vec(),
        }
    }

    fn merged(suction: Vec<Point2<f64>>, pressure: Vec<Point2<f64>>) -> Self {
        let mut points: Vec<Point2<f64>> = suction.iter().chain(pressure.iter()).copied().collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self {
            suction,
            pressure,
            points,
        }
    }

    /// The resampled points. When resampling took place they are sorted by ascending x, otherwise
    /// they are the original loop in its original order.
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// A closed outline suitable for filling: from the trailing edge forward along the suction
    /// side, through the leading edge and aft along the pressure side.
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result: Vec<Point2<f64>> = self.suction.iter().rev().copied().collect();
        result.extend_from_slice(&self.pressure);
        result
    }
}

/// Resamples a boundary to `params.target_count` points.
///
/// If the boundary already has at least that many points it is returned unchanged. Otherwise the
/// suction side receives `target_count / 2` points and the pressure side the remainder. A failure
/// on either side fails the whole boundary; a partially resampled result is never returned.
pub fn resample_boundary(
    boundary: &BoundaryPolyline,
    params: &ResampleParams,
) -> Result<ResampledPolyline, ResampleFailure> {
    let target = params.target_count;
    if target <= boundary.len() {
        debug!(
            points = boundary.len(),
            target, "boundary already dense enough, passing through"
        );
        return Ok(ResampledPolyline::passthrough(boundary));
    }

    let (suction, pressure) = boundary.split();
    let suction_quota = target / 2;
    let pressure_quota = target - suction_quota;

    let suction = resample_side(&suction, suction_quota, params.leading_edge_gap)?;
    let pressure = resample_side(&pressure, pressure_quota, params.leading_edge_gap)?;
    debug!(
        suction = suction.len(),
        pressure = pressure.len(),
        "resampled boundary"
    );

    Ok(ResampledPolyline::merged(suction, pressure))
}

/// Builds a boundary from parallel coordinate columns and resamples it to `target_count` points
/// with the default leading edge gap.
pub fn resample(
    x: &[f64],
    y: &[f64],
    target_count: usize,
) -> Result<ResampledPolyline, PipelineError> {
    let boundary = BoundaryPolyline::from_xy(x, y)?;
    let params = ResampleParams {
        target_count,
        ..ResampleParams::default()
    };

    Ok(resample_boundary(&boundary, &params)?)
}

/// Resamples one side to exactly `quota` points, sorted by ascending x. A side longer than its
/// quota is thinned onto the grid the same way a short one is densified.
pub fn resample_side(
    side: &Side,
    quota: usize,
    gap: f64,
) -> Result<Vec<Point2<f64>>, ResampleFailure> {
    let fail = |reason| ResampleFailure::new(side.kind, reason);

    let edge_count = side.leading_edge_count(gap);
    let (edge, rest) = side.points.split_at(edge_count);
    if rest.len() < 2 {
        return Err(fail(ResampleReason::InsufficientPoints { count: rest.len() }));
    }

    if let Some(i) = rest.windows(2).position(|w| w[1].x < w[0].x) {
        return Err(fail(ResampleReason::NonMonotonic {
            index: edge_count + i + 1,
        }));
    }

    // the grid has to span from the first to the last point after the leading edge run
    if quota < edge_count + 2 {
        return Err(fail(ResampleReason::InsufficientPoints {
            count: quota.saturating_sub(edge_count),
        }));
    }

    let grid_count = quota - edge_count;
    let xs: Vec<f64> = rest.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = rest.iter().map(|p| p.y).collect();
    let grid = linspace(xs[0], xs[xs.len() - 1], grid_count);

    let mut points = edge.to_vec();
    points.extend(grid.iter().map(|x| Point2::new(*x, interp(&xs, &ys, *x))));
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    Ok(points)
}
