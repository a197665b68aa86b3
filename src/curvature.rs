//! Curvature heatmaps of rasterized silhouettes.
//!
//! The silhouette is differentiated with a Scharr operator, its outer boundary is traced as an
//! ordered pixel loop, and the change in gradient direction between boundary pixels a fixed number
//! of steps apart is written into a grid the size of the image. The turning rate of the boundary
//! normal over that window approximates the local bend of the outline: straight runs read close
//! to zero and sharp corners close to pi/2.

use crate::errors::InvalidParams;
use crate::params::{validate_curvature, CurvatureParams};
use image::GrayImage;
use ncollide2d::na::DMatrix;
use tracing::debug;

pub mod contour;
pub mod gradient;
pub mod heatmap;
pub mod smooth;

pub use self::contour::{find_outer_contours, Contour};
pub use self::gradient::{scharr_gradients, GradientField};
pub use self::heatmap::curvature_heatmap;
pub use self::smooth::smooth_heatmap;

/// Runs the full curvature estimate on a silhouette image. The result has one row per image row
/// and one column per image column. An image with no dark region produces an all-zero grid.
pub fn compute_curvature_heatmap(
    image: &GrayImage,
    params: &CurvatureParams,
) -> Result<DMatrix<f64>, InvalidParams> {
    validate_curvature(params)?;

    let field = scharr_gradients(image, params.gradient_bias);
    let contours = find_outer_contours(image, params.threshold);
    debug!(
        contours = contours.len(),
        pixels = contours.iter().map(Contour::len).sum::<usize>(),
        "traced silhouette"
    );

    let heatmap = curvature_heatmap(&contours, &field, params.neighbor_offset);
    Ok(match &params.smoothing {
        Some(smoothing) => smooth_heatmap(&heatmap, smoothing),
        None => heatmap,
    })
}
