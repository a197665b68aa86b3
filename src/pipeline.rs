//! Per-airfoil processing and the parallel batch driver built on top of it.

use crate::airfoil::resample::{resample_boundary, ResampledPolyline};
use crate::airfoil::BoundaryPolyline;
use crate::curvature::compute_curvature_heatmap;
use crate::dataset::ingest::AirfoilRecord;
use crate::errors::{BatchError, DatasetError, PipelineError};
use crate::params::PipelineParams;
use crate::raster::{rasterize, Raster};
use ncollide2d::na::DMatrix;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Everything derived from one boundary
#[derive(Debug, Clone)]
pub struct AirfoilProducts {
    pub id: String,
    pub resampled: ResampledPolyline,
    pub raster: Raster,
    pub heatmap: DMatrix<f64>,
}

/// Resamples, rasterizes and measures the curvature of one boundary. The outline is rasterized
/// in loop order so that the fill sees a simple polygon, not the x-sorted point set.
pub fn process_boundary(
    id: &str,
    boundary: &BoundaryPolyline,
    params: &PipelineParams,
) -> Result<AirfoilProducts, PipelineError> {
    let resampled = resample_boundary(boundary, &params.resample)?;
    let raster = rasterize(&resampled.to_outer_contour(), &params.raster)?;
    let heatmap = compute_curvature_heatmap(&raster.image, &params.curvature)?;
    debug!(id, points = resampled.len(), "processed airfoil");

    Ok(AirfoilProducts {
        id: id.to_string(),
        resampled,
        raster,
        heatmap,
    })
}

pub fn process_airfoil(
    record: &AirfoilRecord,
    params: &PipelineParams,
) -> Result<AirfoilProducts, PipelineError> {
    let boundary = record.coords.to_boundary()?;
    process_boundary(&record.id, &boundary, params)
}

/// Number of points of the densest boundary, used to bring a whole catalog to a common size
pub fn densest_count(records: &[AirfoilRecord]) -> usize {
    records.iter().map(|r| r.coords.xs().len()).max().unwrap_or(0)
}

#[derive(Debug)]
pub struct BatchFailure {
    pub id: String,
    pub error: BatchError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }
}

/// Processes every record in parallel and hands each successful result to `sink`. A failing
/// airfoil, whether in the pipeline or in the sink, is logged and recorded in the report and
/// never stops the rest of the batch. Ids in the report keep the order of `records`.
pub fn process_batch<F>(records: &[AirfoilRecord], params: &PipelineParams, sink: F) -> BatchReport
where
    F: Fn(&AirfoilProducts) -> Result<(), DatasetError> + Sync,
{
    let outcomes: Vec<Result<String, BatchFailure>> = records
        .par_iter()
        .map(|record| {
            let result = process_airfoil(record, params)
                .map_err(BatchError::from)
                .and_then(|products| sink(&products).map_err(BatchError::from));

            match result {
                Ok(()) => Ok(record.id.clone()),
                Err(error) => {
                    warn!(id = %record.id, %error, "skipping airfoil");
                    Err(BatchFailure {
                        id: record.id.clone(),
                        error,
                    })
                }
            }
        })
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(id) => report.processed.push(id),
            Err(failure) => report.failures.push(failure),
        }
    }

    info!(
        processed = report.processed.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    report
}
