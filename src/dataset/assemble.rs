use crate::airfoil::resample::ResampledPolyline;
use crate::dataset::ingest::{AirfoilRecord, Coordinates, Polars};
use crate::errors::DatasetError;
use image::{GrayImage, Luma};
use ncollide2d::na::DMatrix;
use serde::Serialize;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maps a curvature heatmap onto 8-bit intensities, 0 for no bend and 255 for a bend of pi
pub fn heatmap_to_image(heatmap: &DMatrix<f64>) -> GrayImage {
    let (rows, cols) = heatmap.shape();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = heatmap[(y as usize, x as usize)] / PI * 255.0;
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

/// Replaces anything that is not safe in a file name
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Locations of the silhouette and heatmap images of one airfoil
pub fn product_paths(dir: &Path, id: &str) -> (PathBuf, PathBuf) {
    let stem = sanitize_id(id);
    (
        dir.join(format!("{}.png", stem)),
        dir.join(format!("{}_curvature.png", stem)),
    )
}

/// Writes the silhouette and the heatmap of one airfoil as PNG files, returning their paths
pub fn save_products(
    dir: &Path,
    id: &str,
    silhouette: &GrayImage,
    heatmap: &DMatrix<f64>,
) -> Result<(PathBuf, PathBuf), DatasetError> {
    let (image_path, heatmap_path) = product_paths(dir, id);
    silhouette.save(&image_path)?;
    heatmap_to_image(heatmap).save(&heatmap_path)?;

    Ok((image_path, heatmap_path))
}

/// Gathers resampled boundaries from parallel workers for `write_resampled`
#[derive(Debug, Default)]
pub struct ResampledCollector {
    inner: Mutex<BTreeMap<String, ResampledPolyline>>,
}

impl ResampledCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, resampled: &ResampledPolyline) -> Result<(), DatasetError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| DatasetError::Poisoned("resampled catalog"))?;
        map.insert(id.to_string(), resampled.clone());
        Ok(())
    }

    pub fn into_map(self) -> Result<BTreeMap<String, ResampledPolyline>, DatasetError> {
        self.inner
            .into_inner()
            .map_err(|_| DatasetError::Poisoned("resampled catalog"))
    }
}

#[derive(Serialize)]
struct ResampledEntry<'a> {
    coords: Coordinates,

    #[serde(skip_serializing_if = "Option::is_none")]
    polars: Option<&'a Polars>,
}

/// Writes resampled boundaries as a catalog in the pair layout, carrying over the polars of the
/// source records, so that it can be read back and tabulated like any other catalog. Records
/// without a resampled boundary are left out.
pub fn write_resampled(
    path: &Path,
    records: &[AirfoilRecord],
    resampled: &BTreeMap<String, ResampledPolyline>,
) -> Result<(), DatasetError> {
    let catalog: BTreeMap<&str, ResampledEntry> = records
        .iter()
        .filter_map(|record| {
            let r = resampled.get(&record.id)?;
            let pairs = r.points().iter().map(|p| [p.x, p.y]).collect();
            Some((
                record.id.as_str(),
                ResampledEntry {
                    coords: Coordinates::Pairs(pairs),
                    polars: record.polars.as_ref(),
                },
            ))
        })
        .collect();

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &catalog)?;
    Ok(())
}
