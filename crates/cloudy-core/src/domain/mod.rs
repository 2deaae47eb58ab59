pub mod errors;

pub use errors::{ComputeResult, GridError, GridErrorCategory};

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const PARAMETER_COUNT: usize = 5;

pub const PARAMETER_COLUMNS: [&str; PARAMETER_COUNT] = [
    "log_metallicity",
    "log_hden",
    "log_turbulence",
    "log_isrf",
    "log_radius",
];

/// One simulator configuration, in `centers.txt` column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterPoint {
    pub log_metallicity: f64,
    pub log_hden: f64,
    pub log_turbulence: f64,
    pub log_isrf: f64,
    pub log_radius: f64,
}

impl ParameterPoint {
    pub const fn new(
        log_metallicity: f64,
        log_hden: f64,
        log_turbulence: f64,
        log_isrf: f64,
        log_radius: f64,
    ) -> Self {
        Self {
            log_metallicity,
            log_hden,
            log_turbulence,
            log_isrf,
            log_radius,
        }
    }

    pub const fn from_row(row: [f64; PARAMETER_COUNT]) -> Self {
        Self::new(row[0], row[1], row[2], row[3], row[4])
    }

    pub const fn values(&self) -> [f64; PARAMETER_COUNT] {
        [
            self.log_metallicity,
            self.log_hden,
            self.log_turbulence,
            self.log_isrf,
            self.log_radius,
        ]
    }

    /// Directory and file stem shared by every artifact of this point's run.
    pub fn run_name(&self) -> String {
        format!(
            "hden{:.5}_metallicity{:.5}_turbulence{:.5}_isrf{:.5}_radius{:.5}",
            self.log_hden, self.log_metallicity, self.log_turbulence, self.log_isrf, self.log_radius
        )
    }
}

impl Display for ParameterPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.run_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub name: String,
    pub directory: PathBuf,
}

impl RunPaths {
    pub fn new(grid_root: &Path, point: &ParameterPoint) -> Self {
        let name = point.run_name();
        let directory = grid_root.join(&name);
        Self { name, directory }
    }

    pub fn input_file(&self) -> PathBuf {
        self.directory.join(format!("{}.in", self.name))
    }

    pub fn log_file(&self) -> PathBuf {
        self.directory.join(format!("{}.out", self.name))
    }

    pub fn emissivity_file(&self) -> PathBuf {
        self.directory.join(format!("{}_em.str", self.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Ok,
    Broken,
    NotStarted,
    ExcludedByDensityFloor,
}

impl RunStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Broken => "broken",
            Self::NotStarted => "not-started",
            Self::ExcludedByDensityFloor => "excluded",
        }
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeModule {
    InputGen,
    Scan,
    Integrate,
}

impl ComputeModule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputGen => "INPUTGEN",
            Self::Scan => "SCAN",
            Self::Integrate => "INTEGRATE",
        }
    }
}

impl Display for ComputeModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// What a pipeline module is asked to work on: a grid root holding one
/// run directory per point, and the centers table that enumerates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeRequest {
    pub module: ComputeModule,
    pub grid_root: PathBuf,
    pub centers_path: PathBuf,
    pub skip_rows: usize,
}

impl ComputeRequest {
    pub fn new(
        module: ComputeModule,
        grid_root: impl Into<PathBuf>,
        centers_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            module,
            grid_root: grid_root.into(),
            centers_path: centers_path.into(),
            skip_rows: 0,
        }
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub(crate) fn expect_module(&self, expected: ComputeModule) -> ComputeResult<()> {
        if self.module != expected {
            return Err(GridError::input_validation(
                "INPUT.REQUEST_MODULE",
                format!("{} module received a {} request", expected, self.module),
            ));
        }
        Ok(())
    }
}
