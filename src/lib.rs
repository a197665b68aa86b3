//! Airfoil geometry processing: boundary resampling, silhouette rasterization and curvature
//! heatmaps, plus the catalog and dataset plumbing around them.

pub mod airfoil;
pub mod algorithms;
pub mod curvature;
pub mod dataset;
pub mod errors;
pub mod geometry;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod serialize;

pub use crate::airfoil::resample::{resample, resample_boundary, ResampledPolyline};
pub use crate::airfoil::BoundaryPolyline;
pub use crate::curvature::compute_curvature_heatmap;
pub use crate::params::PipelineParams;
pub use crate::raster::{rasterize, Raster};
