//! Everything around the geometry pipeline that deals with files: reading airfoil catalogs,
//! writing the flat training table and persisting the per-airfoil image products.

pub mod assemble;
pub mod ingest;
pub mod table;

pub use self::assemble::{save_products, write_resampled, ResampledCollector};
pub use self::ingest::{dedup_records, load_records, AirfoilRecord, Coordinates, Polars};
pub use self::table::{build_rows, dedup_rows, read_table, write_table, TableBuild, TableRow};
