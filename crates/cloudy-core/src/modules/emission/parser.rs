use super::model::EmissivityTable;
use crate::common::EmissivitySchema;
use crate::domain::{ComputeResult, GridError};
use std::fs;
use std::path::Path;

pub(super) fn read_emissivity_table(
    path: &Path,
    schema: EmissivitySchema,
) -> ComputeResult<EmissivityTable> {
    let source = fs::read_to_string(path).map_err(|source| {
        GridError::io_system(
            "IO.EMISSIVITY_READ",
            format!(
                "failed to read emissivity table '{}': {}",
                path.display(),
                source
            ),
        )
    })?;
    parse_emissivity_table(&source, schema).map_err(|error| error.in_file(path))
}

/// Whitespace-separated numeric rows; `#` lines (the simulator's column
/// header) and blank lines are skipped. Every row must match the schema
/// width exactly.
pub(super) fn parse_emissivity_table(
    source: &str,
    schema: EmissivitySchema,
) -> ComputeResult<EmissivityTable> {
    let width = schema.column_count();
    let mut rows = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    GridError::input_validation(
                        "INPUT.EMISSIVITY_VALUE",
                        format!("line {} has non-numeric value '{}'", index + 1, token),
                    )
                })
            })
            .collect::<ComputeResult<Vec<f64>>>()?;

        if row.len() != width {
            return Err(GridError::input_validation(
                "INPUT.EMISSIVITY_COLUMNS",
                format!(
                    "line {} has {} columns, schema expects {}",
                    index + 1,
                    row.len(),
                    width
                ),
            ));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(GridError::input_validation(
            "INPUT.EMISSIVITY_EMPTY",
            "emissivity table has no data rows",
        ));
    }

    Ok(EmissivityTable::new(schema, rows))
}
