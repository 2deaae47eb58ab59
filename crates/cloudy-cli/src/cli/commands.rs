use super::CliError;
use super::helpers::{GridContext, ScanReport, load_grid_context, write_json_report};
use cloudy_core::common::EmissivitySchema;
use cloudy_core::domain::ComputeModule;
use cloudy_core::modules::ModuleExecutor;
use cloudy_core::modules::centers::write_centers;
use cloudy_core::modules::emission::IntegrateModule;
use cloudy_core::modules::inputgen::{InputDeckTemplate, InputGenModule};
use cloudy_core::modules::scan::ScanModule;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct GridArgs {
    /// Grid root holding centers.txt and one directory per run
    #[arg(long)]
    pub(super) grid_dir: PathBuf,

    /// JSON grid config; flags below override its fields
    #[arg(long)]
    pub(super) config: Option<PathBuf>,

    /// Centers table path (default: <grid-dir>/<centersFile>)
    #[arg(long)]
    pub(super) centers: Option<PathBuf>,

    /// Leading centers-table lines to skip
    #[arg(long)]
    pub(super) skip_rows: Option<usize>,
}

#[derive(clap::Args)]
pub(super) struct GenerateArgs {
    #[command(flatten)]
    pub(super) grid: GridArgs,

    /// CMB redshift written into every input deck
    #[arg(long, allow_negative_numbers = true)]
    redshift: Option<f64>,

    /// Cosmic-ray background scale (linear)
    #[arg(long)]
    cosmic_ray_background: Option<f64>,
}

#[derive(clap::Args)]
pub(super) struct ScanArgs {
    #[command(flatten)]
    pub(super) grid: GridArgs,

    /// Worker threads; the centers table is split into this many chunks
    #[arg(long)]
    workers: Option<usize>,

    /// Runs with log_hden at or below this value are counted as excluded
    #[arg(long, allow_negative_numbers = true)]
    hden_floor: Option<f64>,

    /// Write the counts as a JSON report
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct IntegrateArgs {
    #[command(flatten)]
    pub(super) grid: GridArgs,

    /// Radius drop that marks a simulator restart
    #[arg(long)]
    restart_threshold: Option<f64>,

    /// Results table path (default: <grid-dir>/<resultsFile>)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the points without a result, in centers-table format
    #[arg(long)]
    failed_centers: Option<PathBuf>,
}

pub(super) fn run_generate_command(args: GenerateArgs) -> Result<i32, CliError> {
    let GridContext {
        mut config,
        request,
    } = load_grid_context(&args.grid, ComputeModule::InputGen)?;
    if let Some(redshift) = args.redshift {
        config.redshift = redshift;
    }
    if let Some(cosmic_ray_background) = args.cosmic_ray_background {
        config.cosmic_ray_background = cosmic_ray_background;
    }
    config.validate()?;

    let module = InputGenModule::new(InputDeckTemplate {
        redshift: config.redshift,
        cosmic_ray_background: config.cosmic_ray_background,
        schema: EmissivitySchema::default(),
    });
    let summary = module.execute(&request)?;

    println!("created: {}", summary.created);
    println!("written_into_existing: {}", summary.written_into_existing);
    println!("skipped: {}", summary.skipped);
    println!("failed: {}", summary.failed);
    Ok(0)
}

pub(super) fn run_scan_command(args: ScanArgs) -> Result<i32, CliError> {
    let GridContext {
        mut config,
        request,
    } = load_grid_context(&args.grid, ComputeModule::Scan)?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(hden_floor) = args.hden_floor {
        config.hden_floor = hden_floor;
    }
    config.validate()?;

    let module = ScanModule {
        workers: config.workers,
        hden_floor: config.hden_floor,
    };
    let counts = module.execute(&request)?;

    println!("ok: {}", counts.ok);
    println!("broken: {}", counts.broken);
    println!("not_started: {}", counts.not_started);
    println!("excluded: {}", counts.excluded);
    println!("total: {}", counts.total());

    if let Some(report_path) = args.report {
        let report = ScanReport {
            centers: request.centers_path.clone(),
            workers: config.workers,
            hden_floor: config.hden_floor,
            total: counts.total(),
            counts,
        };
        write_json_report(&report_path, &report)?;
        println!("JSON report: {}", report_path.display());
    }
    Ok(0)
}

pub(super) fn run_integrate_command(args: IntegrateArgs) -> Result<i32, CliError> {
    let GridContext {
        mut config,
        request,
    } = load_grid_context(&args.grid, ComputeModule::Integrate)?;
    if let Some(restart_threshold) = args.restart_threshold {
        config.restart_threshold = restart_threshold;
    }
    config.validate()?;

    let module = IntegrateModule {
        schema: EmissivitySchema::default(),
        restart_threshold: config.restart_threshold,
    };
    let report = module.execute(&request)?;

    let output = args
        .output
        .unwrap_or_else(|| request.grid_root.join(&config.results_file));
    report.table.write(&output)?;
    if let Some(failed_path) = &args.failed_centers {
        write_centers(failed_path, &report.broken)?;
    }

    println!("ok: {}", report.ok.len());
    println!("broken: {}", report.broken.len());
    println!("results: {}", output.display());
    Ok(0)
}
