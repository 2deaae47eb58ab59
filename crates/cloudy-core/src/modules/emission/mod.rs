mod model;
mod parser;
mod results;

pub use model::{EmissivityTable, LineIntensities, converged_start_index};
pub use results::ResultsTable;

use super::ModuleExecutor;
use super::centers::read_centers;
use super::runlog::log_reports_success;
use crate::common::EmissivitySchema;
use crate::common::config::DEFAULT_RESTART_THRESHOLD;
use crate::domain::{
    ComputeModule, ComputeRequest, ComputeResult, GridError, ParameterPoint, RunPaths,
};
use parser::read_emissivity_table;
use std::path::Path;
use std::time::Instant;

const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrateModule {
    pub schema: EmissivitySchema,
    pub restart_threshold: f64,
}

impl Default for IntegrateModule {
    fn default() -> Self {
        Self {
            schema: EmissivitySchema::default(),
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
        }
    }
}

impl ModuleExecutor for IntegrateModule {
    type Output = IntegrationReport;

    fn execute(&self, request: &ComputeRequest) -> ComputeResult<IntegrationReport> {
        request.expect_module(ComputeModule::Integrate)?;
        let points = read_centers(&request.centers_path, request.skip_rows)?;
        Ok(integrate_grid(
            &request.grid_root,
            &points,
            self.schema,
            self.restart_threshold,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationReport {
    pub table: ResultsTable,
    pub ok: Vec<ParameterPoint>,
    pub broken: Vec<ParameterPoint>,
}

/// Reads one finished run and integrates every emission line over the
/// converged segment of its radius grid.
pub fn integrate_point(
    grid_root: &Path,
    point: &ParameterPoint,
    schema: EmissivitySchema,
    restart_threshold: f64,
) -> ComputeResult<LineIntensities> {
    let paths = RunPaths::new(grid_root, point);
    let log_file = paths.log_file();
    if !log_reports_success(&log_file)? {
        return Err(GridError::run_not_finished(&log_file));
    }

    let table = read_emissivity_table(&paths.emissivity_file(), schema)?;
    let total_rows = table.row_count();
    let converged = table.converged(restart_threshold);
    tracing::debug!(
        run = %paths.name,
        rows = total_rows,
        converged_rows = converged.row_count(),
        "integrating converged segment"
    );
    converged.integrate_lines()
}

/// Integrates every point in input order. A point that fails at any stage
/// contributes a NaN row and lands in `broken`; the batch always completes.
pub fn integrate_grid(
    grid_root: &Path,
    points: &[ParameterPoint],
    schema: EmissivitySchema,
    restart_threshold: f64,
) -> IntegrationReport {
    let started = Instant::now();
    let mut report = IntegrationReport {
        table: ResultsTable::new(schema),
        ok: Vec::new(),
        broken: Vec::new(),
    };

    for (row, point) in points.iter().enumerate() {
        match integrate_point(grid_root, point, schema, restart_threshold) {
            Ok(intensities) => {
                report.table.push_result(point, &intensities);
                report.ok.push(*point);
            }
            Err(error) => {
                if error.is_unfinished_run() {
                    tracing::debug!(run = %point, "run did not finish, recording NaN row");
                } else {
                    tracing::warn!(
                        run = %point,
                        error = %error,
                        "failed to integrate run, recording NaN row"
                    );
                }
                report.table.push_missing(point);
                report.broken.push(*point);
            }
        }

        if row % PROGRESS_INTERVAL == 1 {
            tracing::info!(
                done = row,
                remaining = points.len() - row,
                elapsed_minutes = started.elapsed().as_secs_f64() / 60.0,
                "integration progress"
            );
        }
    }

    tracing::info!(
        ok = report.ok.len(),
        broken = report.broken.len(),
        elapsed_minutes = started.elapsed().as_secs_f64() / 60.0,
        "line integration finished"
    );
    report
}
