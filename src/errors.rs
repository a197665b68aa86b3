use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which half of the boundary loop a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideKind {
    Suction,
    Pressure,
}

impl Display for SideKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SideKind::Suction => write!(f, "suction"),
            SideKind::Pressure => write!(f, "pressure"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidGeometry {
    #[error("a boundary needs at least 3 points, got {0}")]
    NotEnoughPoints(usize),

    #[error("x has {x} values but y has {y}")]
    MismatchedLengths { x: usize, y: usize },

    #[error("non-finite coordinate at index {0}")]
    NonFinite(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum ResampleReason {
    #[error("x is not monotonic after the leading edge (index {index})")]
    NonMonotonic { index: usize },

    #[error("only {count} usable points remain after leading edge extraction")]
    InsufficientPoints { count: usize },
}

#[derive(Debug, Error, PartialEq)]
#[error("resampling the {side} side failed: {reason}")]
pub struct ResampleFailure {
    pub side: SideKind,
    pub reason: ResampleReason,
}

impl ResampleFailure {
    pub fn new(side: SideKind, reason: ResampleReason) -> Self {
        Self { side, reason }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RasterizationFailure {
    #[error("bounding box has zero width or height ({dx} x {dy})")]
    DegenerateBounds { dx: f64, dy: f64 },

    #[error("target frame {width} x {height} has no usable area")]
    EmptyFrame { width: u32, height: u32 },

    #[error("a polygon needs at least 3 points, got {0}")]
    NotEnoughPoints(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidParams {
    #[error("smoothing kernel must be an odd positive integer, got {0}")]
    SmoothKernel(usize),

    #[error("neighbor offset must be positive")]
    NeighborOffset,

    #[error("fixed smoothing sigma must be finite and positive, got {0}")]
    Sigma(f64),

    #[error("padding must lie in [0, 0.5), got {0}")]
    Padding(f64),

    #[error("leading edge gap must be finite and non-negative, got {0}")]
    LeadingEdgeGap(f64),
}

/// Everything that can go wrong while processing a single airfoil. The batch driver records one of
/// these per failed id and moves on.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),

    #[error(transparent)]
    Resample(#[from] ResampleFailure),

    #[error(transparent)]
    Raster(#[from] RasterizationFailure),

    #[error(transparent)]
    Params(#[from] InvalidParams),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("record {id} has mismatched polar columns")]
    MismatchedPolars { id: String },

    #[error("lock guarding the {0} was poisoned by a panicking worker")]
    Poisoned(&'static str),

    #[error(transparent)]
    Params(#[from] InvalidParams),
}

/// Why one airfoil of a batch produced no output
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("writing products failed: {0}")]
    Output(#[from] DatasetError),
}
