use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use foil_curvature::airfoil::generate::{AirfoilGenerator, Naca4Digit};
use foil_curvature::dataset::{
    build_rows, dedup_records, dedup_rows, load_records, save_products, write_resampled,
    write_table, AirfoilRecord, ResampledCollector,
};
use foil_curvature::pipeline::{densest_count, process_batch, process_boundary};
use foil_curvature::PipelineParams;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Airfoil silhouettes and curvature heatmaps from boundary catalogs
#[derive(Parser, Debug)]
#[command(name = "foil-curvature")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with pipeline parameters; omitted fields keep their defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten catalogs into a CSV table with one row per airfoil and angle of attack
    Tabulate {
        /// Catalog files, named `<anything>_<reynolds>.json`
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,

        /// Keep rows whose shape already appeared under another name
        #[arg(long)]
        keep_duplicates: bool,
    },

    /// Rasterize every airfoil of a catalog and write its silhouette and heatmap
    Process {
        input: PathBuf,

        /// Directory receiving `<id>.png` and `<id>_curvature.png`
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Also write the resampled boundaries as a catalog
        #[arg(long)]
        resampled: Option<PathBuf>,

        /// Resample every airfoil to the point count of the densest one
        #[arg(long)]
        match_densest: bool,
    },

    /// Generate a NACA 4-digit section and run it through the pipeline
    Naca {
        /// Designation such as 2412
        digits: String,

        /// Number of chord stations; adaptive spacing is used when omitted
        #[arg(long)]
        stations: Option<usize>,

        #[arg(short, long)]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut params = match &cli.config {
        Some(path) => PipelineParams::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PipelineParams::default(),
    };

    match cli.command {
        Commands::Tabulate {
            inputs,
            output,
            keep_duplicates,
        } => tabulate(&inputs, &output, keep_duplicates),
        Commands::Process {
            input,
            output_dir,
            resampled,
            match_densest,
        } => {
            let records = dedup_records(load_records(&input)?);
            if match_densest {
                params.resample.target_count = densest_count(&records);
            }
            process(&records, &params, &output_dir, resampled.as_deref())
        }
        Commands::Naca {
            digits,
            stations,
            output_dir,
        } => naca(&digits, stations, &params, &output_dir),
    }
}

fn tabulate(inputs: &[PathBuf], output: &Path, keep_duplicates: bool) -> anyhow::Result<()> {
    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for input in inputs.iter() {
        let records = load_records(input).with_context(|| format!("loading {}", input.display()))?;
        let build = build_rows(&records);
        rows.extend(build.rows);
        skipped.extend(build.skipped);
    }
    if !keep_duplicates {
        rows = dedup_rows(rows);
    }

    write_table(BufWriter::new(File::create(output)?), &rows)?;
    info!(
        rows = rows.len(),
        skipped = skipped.len(),
        path = %output.display(),
        "table written"
    );
    Ok(())
}

fn process(
    records: &[AirfoilRecord],
    params: &PipelineParams,
    output_dir: &Path,
    resampled_path: Option<&Path>,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let resampled = ResampledCollector::new();

    let report = process_batch(records, params, |products| {
        save_products(
            output_dir,
            &products.id,
            &products.raster.image,
            &products.heatmap,
        )?;
        resampled.insert(&products.id, &products.resampled)
    });

    if let Some(path) = resampled_path {
        write_resampled(path, records, &resampled.into_map()?)?;
    }

    info!(
        processed = report.processed.len(),
        total = report.total(),
        "catalog processed"
    );
    Ok(())
}

fn parse_naca(digits: &str) -> anyhow::Result<Naca4Digit> {
    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 4 || values.len() != 4 {
        bail!("expected a 4 digit designation, got {:?}", digits);
    }

    let m = values[0] as f64 / 100.0;
    let p = values[1] as f64 / 10.0;
    let t = (values[2] * 10 + values[3]) as f64 / 100.0;
    Ok(Naca4Digit::new(t, 1.0, m, p))
}

fn naca(
    digits: &str,
    stations: Option<usize>,
    params: &PipelineParams,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let generator = parse_naca(digits)?;
    let airfoil = match stations {
        Some(n) if n >= 2 => {
            let fractions: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
            generator.generate_at(&fractions)
        }
        Some(n) => bail!("at least 2 stations are needed, got {}", n),
        None => generator.generate(Some(1e-4)),
    };

    let id = format!("naca{}", digits);
    let products = process_boundary(&id, &airfoil.to_boundary()?, params)?;

    std::fs::create_dir_all(output_dir)?;
    let (image, heatmap) = save_products(
        output_dir,
        &id,
        &products.raster.image,
        &products.heatmap,
    )?;
    info!(image = %image.display(), heatmap = %heatmap.display(), "section written");
    Ok(())
}
