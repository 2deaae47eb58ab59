use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ComputeResult<T> = Result<T, GridError>;

/// Placeholder of the error raised for a run whose log lacks the success
/// marker. The integrator treats it as an expected outcome, not a fault.
const RUN_NOT_FINISHED: &str = "RUN.LOG_NOT_OK";

/// Broad failure class; each maps to the process exit code the CLI uses
/// when the error aborts a whole command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridErrorCategory {
    /// Malformed centers table, config or CLI arguments.
    InputValidationError,
    /// Unreadable or unwritable grid files.
    IoSystemError,
    /// A run's outputs could not be turned into intensities.
    ComputationError,
    /// The worker pool or another runtime facility failed.
    InternalError,
}

impl GridErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }
}

impl Display for GridErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// Error carried through every grid operation.
///
/// `placeholder` is a stable dotted identifier (`IO.RUN_LOG_READ`,
/// `RUN.LOG_NOT_OK`, ...) that tests and log filters can match on without
/// depending on the free-form message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category} [{placeholder}] {message}")]
pub struct GridError {
    category: GridErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl GridError {
    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(GridErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(GridErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(GridErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::with_category(GridErrorCategory::InternalError, placeholder, message)
    }

    pub fn run_not_finished(log_file: &Path) -> Self {
        Self::computation(
            RUN_NOT_FINISHED,
            format!(
                "run log '{}' does not end with the success marker",
                log_file.display()
            ),
        )
    }

    fn with_category(
        category: GridErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    /// Prefixes the message with the file a parse error came from.
    pub fn in_file(mut self, path: &Path) -> Self {
        self.message = format!("{}: {}", path.display(), self.message);
        self
    }

    pub const fn category(&self) -> GridErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_unfinished_run(&self) -> bool {
        self.placeholder == RUN_NOT_FINISHED
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
