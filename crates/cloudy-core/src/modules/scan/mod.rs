use super::ModuleExecutor;
use super::centers::read_centers;
use super::runlog::log_reports_success;
use crate::common::config::{DEFAULT_HDEN_FLOOR, DEFAULT_WORKERS};
use crate::domain::{
    ComputeModule, ComputeRequest, ComputeResult, GridError, ParameterPoint, RunPaths, RunStatus,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::Add;
use std::path::Path;

const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCounts {
    pub ok: usize,
    pub broken: usize,
    pub not_started: usize,
    pub excluded: usize,
}

impl ScanCounts {
    pub fn total(&self) -> usize {
        self.ok + self.broken + self.not_started + self.excluded
    }

    pub fn record(&mut self, status: RunStatus) {
        match status {
            RunStatus::Ok => self.ok += 1,
            RunStatus::Broken => self.broken += 1,
            RunStatus::NotStarted => self.not_started += 1,
            RunStatus::ExcludedByDensityFloor => self.excluded += 1,
        }
    }
}

impl Add for ScanCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            ok: self.ok + other.ok,
            broken: self.broken + other.broken,
            not_started: self.not_started + other.not_started,
            excluded: self.excluded + other.excluded,
        }
    }
}

impl Sum for ScanCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanModule {
    pub workers: usize,
    pub hden_floor: f64,
}

impl Default for ScanModule {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            hden_floor: DEFAULT_HDEN_FLOOR,
        }
    }
}

impl ModuleExecutor for ScanModule {
    type Output = ScanCounts;

    fn execute(&self, request: &ComputeRequest) -> ComputeResult<ScanCounts> {
        request.expect_module(ComputeModule::Scan)?;
        let points = read_centers(&request.centers_path, request.skip_rows)?;
        scan_grid(&request.grid_root, &points, self.workers, self.hden_floor)
    }
}

/// Contiguous chunks of `ceil(n / workers)` points; the last one may be
/// shorter. Fewer than `workers` chunks come back when the table is small.
pub fn split_points(points: &[ParameterPoint], workers: usize) -> Vec<&[ParameterPoint]> {
    if points.is_empty() {
        return Vec::new();
    }
    let chunk_size = points.len().div_ceil(workers.max(1));
    points.chunks(chunk_size).collect()
}

/// Points whose density is not above the floor (NaN included) are never
/// looked up on disk.
pub fn classify_point(grid_root: &Path, point: &ParameterPoint, hden_floor: f64) -> RunStatus {
    if point.log_hden.partial_cmp(&hden_floor) != Some(Ordering::Greater) {
        return RunStatus::ExcludedByDensityFloor;
    }

    let log_file = RunPaths::new(grid_root, point).log_file();
    match log_reports_success(&log_file) {
        Ok(true) => RunStatus::Ok,
        Ok(false) => RunStatus::Broken,
        Err(_) => RunStatus::NotStarted,
    }
}

pub fn classify_chunk(
    grid_root: &Path,
    chunk: &[ParameterPoint],
    hden_floor: f64,
    report_progress: bool,
) -> ScanCounts {
    let mut counts = ScanCounts::default();
    for (index, point) in chunk.iter().enumerate() {
        counts.record(classify_point(grid_root, point, hden_floor));

        if report_progress && index % PROGRESS_INTERVAL == 1 {
            tracing::info!(
                done = index,
                remaining = chunk.len() - index,
                "scan progress (first chunk)"
            );
        }
    }
    counts
}

/// Classifies every point on a dedicated pool of `workers` threads. Each
/// chunk is owned by one task; the per-chunk counts are summed.
pub fn scan_grid(
    grid_root: &Path,
    points: &[ParameterPoint],
    workers: usize,
    hden_floor: f64,
) -> ComputeResult<ScanCounts> {
    if workers == 0 {
        return Err(GridError::input_validation(
            "INPUT.SCAN_WORKERS",
            "scan requires at least one worker",
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|source| {
            GridError::internal(
                "SYS.SCAN_POOL",
                format!("failed to start scan worker pool: {}", source),
            )
        })?;

    let chunks = split_points(points, workers);
    tracing::info!(
        points = points.len(),
        workers,
        chunks = chunks.len(),
        "scanning run directories"
    );

    let counts: ScanCounts = pool.install(|| {
        chunks
            .par_iter()
            .enumerate()
            .map(|(chunk_index, chunk)| classify_chunk(grid_root, chunk, hden_floor, chunk_index == 0))
            .sum()
    });

    tracing::info!(
        ok = counts.ok,
        broken = counts.broken,
        not_started = counts.not_started,
        excluded = counts.excluded,
        total = counts.total(),
        "scan finished"
    );
    Ok(counts)
}
