//! Tunable parameters for every stage of the pipeline. All groups have defaults matching the
//! values used to build the reference datasets, and the whole set can be loaded from a JSON file
//! in which any field may be omitted.

use crate::errors::{DatasetError, InvalidParams};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleParams {
    /// Total number of points in the resampled boundary
    pub target_count: usize,

    /// Consecutive x steps below this value (in chord units) mark the leading edge neighborhood,
    /// whose points are copied rather than interpolated
    pub leading_edge_gap: f64,
}

impl Default for ResampleParams {
    fn default() -> Self {
        ResampleParams::new(200, 0.01)
    }
}

impl ResampleParams {
    pub fn new(target_count: usize, leading_edge_gap: f64) -> Self {
        ResampleParams {
            target_count,
            leading_edge_gap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterParams {
    pub width: u32,
    pub height: u32,

    /// Empty margin left on each side of the frame, as a fraction of the frame size
    pub padding: f64,
}

impl Default for RasterParams {
    fn default() -> Self {
        RasterParams::new(512, 256, 0.05)
    }
}

impl RasterParams {
    pub fn new(width: u32, height: u32, padding: f64) -> Self {
        RasterParams {
            width,
            height,
            padding,
        }
    }
}

/// How the Gaussian spread of the heatmap smoothing is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigmaMode {
    /// Sigma equals the current maximum of the heatmap. This reproduces the legacy datasets, where
    /// smoothing strength follows the peak curvature.
    PeakValue,

    /// A fixed sigma in pixels
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothParams {
    /// Side length of the square Gaussian kernel, odd
    pub kernel: usize,
    pub sigma: SigmaMode,
}

impl Default for SmoothParams {
    fn default() -> Self {
        SmoothParams::new(3, SigmaMode::PeakValue)
    }
}

impl SmoothParams {
    pub fn new(kernel: usize, sigma: SigmaMode) -> Self {
        SmoothParams { kernel, sigma }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvatureParams {
    /// Pixels darker than this are foreground when tracing the silhouette
    pub threshold: u8,

    /// Index distance along the contour between the two compared gradient samples
    pub neighbor_offset: usize,

    /// Constant added to every horizontal gradient sample
    pub gradient_bias: f64,

    /// `None` leaves the heatmap unsmoothed
    pub smoothing: Option<SmoothParams>,
}

impl Default for CurvatureParams {
    fn default() -> Self {
        CurvatureParams::new(100, 5, 1e-4, Some(SmoothParams::default()))
    }
}

impl CurvatureParams {
    pub fn new(
        threshold: u8,
        neighbor_offset: usize,
        gradient_bias: f64,
        smoothing: Option<SmoothParams>,
    ) -> Self {
        CurvatureParams {
            threshold,
            neighbor_offset,
            gradient_bias,
            smoothing,
        }
    }

    /// Same settings without the smoothing pass
    pub fn unsmoothed(&self) -> Self {
        CurvatureParams {
            smoothing: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub resample: ResampleParams,
    pub raster: RasterParams,
    pub curvature: CurvatureParams,
}

impl PipelineParams {
    /// Reads parameters from a JSON file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = BufReader::new(File::open(path)?);
        let params: PipelineParams = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), InvalidParams> {
        let gap = self.resample.leading_edge_gap;
        if !gap.is_finite() || gap < 0.0 {
            return Err(InvalidParams::LeadingEdgeGap(gap));
        }

        let padding = self.raster.padding;
        if !(0.0..0.5).contains(&padding) {
            return Err(InvalidParams::Padding(padding));
        }

        validate_curvature(&self.curvature)
    }
}

pub fn validate_curvature(params: &CurvatureParams) -> Result<(), InvalidParams> {
    if params.neighbor_offset == 0 {
        return Err(InvalidParams::NeighborOffset);
    }

    if let Some(smoothing) = &params.smoothing {
        if smoothing.kernel % 2 == 0 {
            return Err(InvalidParams::SmoothKernel(smoothing.kernel));
        }

        if let SigmaMode::Fixed(s) = smoothing.sigma {
            if !s.is_finite() || s <= 0.0 {
                return Err(InvalidParams::Sigma(s));
            }
        }
    }

    Ok(())
}
