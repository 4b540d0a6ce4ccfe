use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use coupon_core::LayoutPlan;
use sheet_core::{JobMeta, JobSpec, SheetProof, load_records, pdf, svg};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Lay out label records on print sheets and write trim-marked proofs.
#[derive(Debug, Parser)]
#[command(name = "sheet", version)]
struct Args {
    /// Job description (JSON): paper, label, gaps, optional margins.
    job: PathBuf,
    /// Label records: a JSON array of objects.
    records: PathBuf,
    /// Output .pdf, .svg or .png. SVG and PNG get one file per sheet. An
    /// existing directory receives a PDF named after the job.
    output: PathBuf,
    /// Raster scale for SVG and PNG output.
    #[arg(long, default_value_t = 2.0)]
    px_per_pt: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Pdf,
    Svg,
    Png,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Ok(Format::Pdf),
            Some("svg") => Ok(Format::Svg),
            Some("png") => Ok(Format::Png),
            _ => bail!(
                "unsupported output {}: expected .pdf, .svg or .png",
                path.display()
            ),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    if !(args.px_per_pt.is_finite() && args.px_per_pt > 0.0) {
        bail!("--px-per-pt must be a positive number");
    }

    let spec = JobSpec::from_path(&args.job)?;
    let records = load_records(&args.records)?;
    let file_name = args
        .records
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let meta = spec.meta().or(JobMeta::from_file_name(file_name));

    let config = spec
        .to_layout_config()
        .with_context(|| format!("invalid job file {}", args.job.display()))?;
    let plan = LayoutPlan::new(config)?;
    let grid = plan.grid();
    info!(
        columns = grid.columns,
        rows = grid.rows,
        capacity = grid.capacity,
        "grid"
    );

    let sheets = plan.paginate(&records)?;
    if sheets.is_empty() {
        warn!("no records in {}; nothing to print", args.records.display());
        return Ok(());
    }
    let proofs: Vec<SheetProof> = sheets
        .iter()
        .map(|s| SheetProof::from_sheet(s, &meta, records.len(), sheets.len()))
        .collect();
    info!(
        records = records.len(),
        sheets = proofs.len(),
        "paginated"
    );

    let output = if args.output.is_dir() {
        args.output.join(meta.output_file_name(records.len()))
    } else {
        args.output.clone()
    };

    match Format::from_path(&output)? {
        Format::Pdf => {
            let bytes = pdf::write_pdf(&plan, &proofs);
            write(&output, &bytes)?;
        }
        Format::Svg => {
            for proof in &proofs {
                let (svg, _, _) = svg::build_sheet_svg(&plan, proof, args.px_per_pt);
                write(&numbered(&output, proof.number), svg.as_bytes())?;
            }
        }
        Format::Png => {
            let opt = raster_options();
            for proof in &proofs {
                let (svg, w_px, h_px) = svg::build_sheet_svg(&plan, proof, args.px_per_pt);
                let bytes = rasterize(&svg, w_px, h_px, &opt)?;
                write(&numbered(&output, proof.number), &bytes)?;
            }
        }
    }
    Ok(())
}

/// `out.svg` -> `out-001.svg`.
fn numbered(path: &Path, number: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    path.with_file_name(format!("{stem}-{number:03}.{ext}"))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn raster_options() -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    if fontdb.is_empty() {
        warn!("no system fonts found; captions will not be rasterized");
    }
    opt.fontdb = Arc::new(fontdb);
    opt
}

// SVG -> RGBA -> PNG (deterministic)
fn rasterize(svg: &str, w_px: u32, h_px: u32, opt: &usvg::Options<'_>) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, opt).map_err(|e| anyhow!("SVG parse error: {e:?}"))?;
    let mut pixmap =
        tiny_skia::Pixmap::new(w_px, h_px).ok_or_else(|| anyhow!("pixmap alloc failed"))?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    Ok(sheet_core::encode_rgba_to_png_bytes(
        w_px,
        h_px,
        pixmap.data(),
    )?)
}
