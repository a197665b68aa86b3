//! The flat training table: one row per airfoil and angle of attack.

use crate::dataset::ingest::AirfoilRecord;
use crate::errors::DatasetError;
use crate::serialize::{floats_to_string, string_to_floats};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};
use std::num::ParseFloatError;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub name: String,
    pub angle: f64,
    pub reynolds: String,
    pub x_coords: String,
    pub y_coords: String,
    pub cd: f64,
    pub cl: f64,
    pub cm: f64,
}

impl TableRow {
    /// The boundary coordinates stored in the row
    pub fn coordinates(&self) -> Result<(Vec<f64>, Vec<f64>), ParseFloatError> {
        Ok((
            string_to_floats(&self.x_coords)?,
            string_to_floats(&self.y_coords)?,
        ))
    }
}

/// Rows built from a set of records, plus the records that could not be tabulated
#[derive(Debug, Default)]
pub struct TableBuild {
    pub rows: Vec<TableRow>,
    pub skipped: Vec<DatasetError>,
}

/// Expands every record into one row per polar angle. Records without polars produce no rows. A
/// record whose polar columns disagree in length is logged, skipped and reported in `skipped`;
/// the remaining records are still tabulated.
pub fn build_rows(records: &[AirfoilRecord]) -> TableBuild {
    let mut build = TableBuild::default();
    for record in records.iter() {
        let polars = match &record.polars {
            Some(p) => p,
            None => {
                debug!(id = %record.id, "no polars, skipping");
                continue;
            }
        };
        if !polars.is_consistent() {
            warn!(id = %record.id, "mismatched polar columns, skipping");
            build.skipped.push(DatasetError::MismatchedPolars {
                id: record.id.clone(),
            });
            continue;
        }

        let x_coords = floats_to_string(&record.coords.xs());
        let y_coords = floats_to_string(&record.coords.ys());
        let reynolds = record.reynolds.clone().unwrap_or_default();

        for (i, angle) in polars.alpha.iter().enumerate() {
            build.rows.push(TableRow {
                name: record.id.clone(),
                angle: *angle,
                reynolds: reynolds.clone(),
                x_coords: x_coords.clone(),
                y_coords: y_coords.clone(),
                cd: polars.cd[i],
                cl: polars.cl[i],
                cm: polars.cm[i],
            });
        }
    }

    build
}

/// Drops rows whose coordinates already belong to a differently named airfoil, and rows repeating
/// a (name, reynolds, angle) combination seen earlier.
pub fn dedup_rows(rows: Vec<TableRow>) -> Vec<TableRow> {
    let mut owners: HashMap<(String, String), String> = HashMap::new();
    let mut seen: HashSet<(String, String, u64)> = HashSet::new();

    rows.into_iter()
        .filter(|r| {
            let owner = owners
                .entry((r.x_coords.clone(), r.y_coords.clone()))
                .or_insert_with(|| r.name.clone());
            *owner == r.name && seen.insert((r.name.clone(), r.reynolds.clone(), r.angle.to_bits()))
        })
        .collect()
}

pub fn write_table<W: Write>(writer: W, rows: &[TableRow]) -> Result<(), DatasetError> {
    let mut w = csv::Writer::from_writer(writer);
    for row in rows.iter() {
        w.serialize(row)?;
    }
    w.flush()?;

    Ok(())
}

pub fn read_table<R: Read>(reader: R) -> Result<Vec<TableRow>, DatasetError> {
    let mut r = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in r.deserialize() {
        rows.push(row?);
    }

    Ok(rows)
}
