use super::CliError;
use super::commands::GridArgs;
use anyhow::Context;
use cloudy_core::common::GridConfig;
use cloudy_core::domain::{ComputeModule, ComputeRequest};
use cloudy_core::modules::scan::ScanCounts;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub(super) fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone)]
pub(super) struct GridContext {
    pub(super) config: GridConfig,
    pub(super) request: ComputeRequest,
}

pub(super) fn load_grid_context(
    args: &GridArgs,
    module: ComputeModule,
) -> Result<GridContext, CliError> {
    let mut config = match &args.config {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };
    if let Some(skip_rows) = args.skip_rows {
        config.skip_rows = skip_rows;
    }

    let centers_path = args
        .centers
        .clone()
        .unwrap_or_else(|| args.grid_dir.join(&config.centers_file));
    tracing::info!(
        module = %module,
        grid = %args.grid_dir.display(),
        centers = %centers_path.display(),
        "using centers table"
    );

    let request = ComputeRequest::new(module, &args.grid_dir, centers_path)
        .with_skip_rows(config.skip_rows);
    Ok(GridContext { config, request })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScanReport {
    pub(super) centers: PathBuf,
    pub(super) workers: usize,
    pub(super) hden_floor: f64,
    pub(super) total: usize,
    pub(super) counts: ScanCounts,
}

pub(super) fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory '{}'", parent.display()))?;
    }
    let rendered =
        serde_json::to_string_pretty(report).context("failed to serialize JSON report")?;
    fs::write(path, rendered + "\n")
        .with_context(|| format!("failed to write JSON report '{}'", path.display()))?;
    Ok(())
}
