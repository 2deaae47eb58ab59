use crate::domain::{ComputeResult, GridError};
use std::fs;
use std::path::Path;

pub const SUCCESS_MARKER: &[u8] = b"OK";

/// Final line of a log, trailing newline included when the file has one.
/// An empty log has no final line.
pub fn last_line(content: &str) -> Option<&str> {
    if content.is_empty() {
        return None;
    }
    let body_end = content.strip_suffix('\n').map_or(content.len(), str::len);
    let start = content[..body_end].rfind('\n').map_or(0, |index| index + 1);
    Some(&content[start..])
}

/// A finished simulator log ends with `... OK]` followed by a newline, so
/// the marker sits two bytes before the end of the final line.
pub fn line_has_success_marker(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 4 && &bytes[bytes.len() - 4..bytes.len() - 2] == SUCCESS_MARKER
}

/// Reads a run's `.out` log and reports whether it ended successfully.
/// Missing, unreadable or empty logs are errors; callers decide how to
/// classify them.
pub fn log_reports_success(path: &Path) -> ComputeResult<bool> {
    let content = fs::read_to_string(path).map_err(|source| {
        GridError::io_system(
            "IO.RUN_LOG_READ",
            format!("failed to read run log '{}': {}", path.display(), source),
        )
    })?;
    let content = content.replace("\r\n", "\n");
    let line = last_line(&content).ok_or_else(|| {
        GridError::io_system(
            "IO.RUN_LOG_EMPTY",
            format!("run log '{}' is empty", path.display()),
        )
    })?;
    Ok(line_has_success_marker(line))
}
