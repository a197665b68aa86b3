//! Reading airfoil catalogs. A catalog file is a JSON object keyed by airfoil id, where every entry
//! holds the boundary coordinates and, optionally, a table of polars. The Reynolds number the
//! polars were computed at is encoded at the end of the file name, e.g. `airfoil_data_50000.json`.

use crate::airfoil::BoundaryPolyline;
use crate::errors::{DatasetError, InvalidGeometry};
use crate::serialize::floats_to_string;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Boundary coordinates in either of the two layouts found in catalogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinates {
    /// `[[x, y], [x, y], ...]`
    Pairs(Vec<[f64; 2]>),

    /// `{"x": [...], "y": [...]}`
    Columns { x: Vec<f64>, y: Vec<f64> },
}

impl Coordinates {
    pub fn xs(&self) -> Vec<f64> {
        match self {
            Coordinates::Pairs(pairs) => pairs.iter().map(|p| p[0]).collect(),
            Coordinates::Columns { x, .. } => x.clone(),
        }
    }

    pub fn ys(&self) -> Vec<f64> {
        match self {
            Coordinates::Pairs(pairs) => pairs.iter().map(|p| p[1]).collect(),
            Coordinates::Columns { y, .. } => y.clone(),
        }
    }

    pub fn to_boundary(&self) -> Result<BoundaryPolyline, InvalidGeometry> {
        match self {
            Coordinates::Pairs(pairs) => BoundaryPolyline::from_pairs(pairs),
            Coordinates::Columns { x, y } => BoundaryPolyline::from_xy(x, y),
        }
    }

    /// The coordinates rendered the same way the tabular datasets store them, used to detect
    /// records which share a shape
    pub fn fingerprint(&self) -> (String, String) {
        (floats_to_string(&self.xs()), floats_to_string(&self.ys()))
    }
}

/// Aerodynamic coefficients at a sequence of angles of attack
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Polars {
    pub alpha: Vec<f64>,
    pub cd: Vec<f64>,
    pub cl: Vec<f64>,
    pub cm: Vec<f64>,
}

impl Polars {
    /// True if every coefficient column has one value per angle
    pub fn is_consistent(&self) -> bool {
        let n = self.alpha.len();
        self.cd.len() == n && self.cl.len() == n && self.cm.len() == n
    }
}

/// Some catalogs wrap the polars of an airfoil in a list; only the first entry is used
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PolarsEntry {
    One(Polars),
    Many(Vec<Polars>),
}

impl PolarsEntry {
    fn into_first(self) -> Option<Polars> {
        match self {
            PolarsEntry::One(p) => Some(p),
            PolarsEntry::Many(list) => list.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    coords: Coordinates,

    #[serde(default)]
    polars: Option<PolarsEntry>,
}

/// One airfoil as read from a catalog
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilRecord {
    pub id: String,
    pub reynolds: Option<String>,
    pub coords: Coordinates,
    pub polars: Option<Polars>,
}

/// Catalog ids carry an `-il` suffix which is not part of the airfoil name
pub fn normalize_id(id: &str) -> String {
    id.strip_suffix("-il").unwrap_or(id).to_string()
}

/// The part of the file stem after the last underscore, or the whole stem if there is none
pub fn reynolds_from_stem(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    stem.rsplit('_').next().map(str::to_string)
}

/// Parses catalog JSON. Records come back ordered by their normalized id.
pub fn parse_records<R: Read>(
    reader: R,
    reynolds: Option<&str>,
) -> Result<Vec<AirfoilRecord>, DatasetError> {
    let raw: BTreeMap<String, RawEntry> = serde_json::from_reader(reader)?;

    let mut records: Vec<AirfoilRecord> = raw
        .into_iter()
        .map(|(id, entry)| AirfoilRecord {
            id: normalize_id(&id),
            reynolds: reynolds.map(str::to_string),
            coords: entry.coords,
            polars: entry.polars.and_then(PolarsEntry::into_first),
        })
        .collect();
    records.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(records)
}

/// Reads a catalog file, taking the Reynolds number from its name
pub fn load_records(path: &Path) -> Result<Vec<AirfoilRecord>, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    let reynolds = reynolds_from_stem(path);
    let records = parse_records(reader, reynolds.as_deref())?;
    debug!(path = %path.display(), count = records.len(), "loaded catalog");

    Ok(records)
}

/// Drops repeated ids and records whose coordinates are identical to an earlier record. The first
/// occurrence always wins.
pub fn dedup_records(records: Vec<AirfoilRecord>) -> Vec<AirfoilRecord> {
    let before = records.len();
    let kept: Vec<AirfoilRecord> = records
        .into_iter()
        .unique_by(|r| r.id.clone())
        .unique_by(|r| r.coords.fingerprint())
        .collect();

    if kept.len() < before {
        debug!(dropped = before - kept.len(), "removed duplicate airfoils");
    }
    kept
}
