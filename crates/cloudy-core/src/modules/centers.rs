use super::serialization::{format_row, write_text_artifact};
use crate::domain::{ComputeResult, GridError, PARAMETER_COUNT, ParameterPoint};
use std::fs;
use std::path::Path;

/// Reads a `centers.txt` table: five whitespace-separated numeric columns
/// per row, in metallicity/hden/turbulence/isrf/radius order. The first
/// `skip_rows` physical lines are dropped; blank and `#` lines are ignored.
pub fn read_centers(path: &Path, skip_rows: usize) -> ComputeResult<Vec<ParameterPoint>> {
    let source = fs::read_to_string(path).map_err(|source| {
        GridError::io_system(
            "IO.CENTERS_READ",
            format!("failed to read centers table '{}': {}", path.display(), source),
        )
    })?;
    parse_centers(&source, skip_rows).map_err(|error| error.in_file(path))
}

pub fn parse_centers(source: &str, skip_rows: usize) -> ComputeResult<Vec<ParameterPoint>> {
    let mut points = Vec::new();

    for (index, line) in source.lines().enumerate().skip(skip_rows) {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() != PARAMETER_COUNT {
            return Err(GridError::input_validation(
                "INPUT.CENTERS_COLUMNS",
                format!(
                    "line {} has {} columns, expected {}",
                    line_number,
                    tokens.len(),
                    PARAMETER_COUNT
                ),
            ));
        }

        let mut row = [0.0; PARAMETER_COUNT];
        for (slot, token) in row.iter_mut().zip(&tokens) {
            *slot = token.parse::<f64>().map_err(|_| {
                GridError::input_validation(
                    "INPUT.CENTERS_VALUE",
                    format!("line {} has non-numeric value '{}'", line_number, token),
                )
            })?;
        }
        points.push(ParameterPoint::from_row(row));
    }

    Ok(points)
}

pub fn write_centers(path: &Path, points: &[ParameterPoint]) -> ComputeResult<()> {
    let mut content = String::new();
    for point in points {
        content.push_str(&format_row(&point.values(), 8));
        content.push('\n');
    }

    write_text_artifact(path, &content).map_err(|source| {
        GridError::io_system(
            "IO.CENTERS_WRITE",
            format!("failed to write centers table '{}': {}", path.display(), source),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_centers, read_centers, write_centers};
    use crate::domain::ParameterPoint;
    use tempfile::TempDir;

    #[test]
    fn parses_rows_in_positional_column_order() {
        let points = parse_centers("-1.0 2.0 0.5 1.0 -0.5\n0 1 2 3 4\n", 0).expect("parse");
        assert_eq!(
            points,
            vec![
                ParameterPoint::new(-1.0, 2.0, 0.5, 1.0, -0.5),
                ParameterPoint::new(0.0, 1.0, 2.0, 3.0, 4.0),
            ]
        );
    }

    #[test]
    fn skip_rows_drops_a_header_line() {
        let source = "metallicity hden turbulence isrf radius\n0 1 2 3 4\n";
        let error = parse_centers(source, 0).expect_err("header should not parse");
        assert_eq!(error.placeholder(), "INPUT.CENTERS_VALUE");

        let points = parse_centers(source, 1).expect("parse with skipped header");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].log_radius, 4.0);
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        let points = parse_centers("# grid\n\n0 1 2 3 4\n   \n", 0).expect("parse");
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn wrong_column_count_reports_line_number() {
        let error = parse_centers("0 1 2 3 4\n0 1 2 3\n", 0).expect_err("short row should fail");
        assert_eq!(error.placeholder(), "INPUT.CENTERS_COLUMNS");
        assert!(error.message().contains("line 2"), "{}", error.message());
    }

    #[test]
    fn written_centers_read_back_identically() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("failed_centers.txt");
        let points = vec![
            ParameterPoint::new(-1.25, 2.5, 0.125, -0.75, 1.0),
            ParameterPoint::new(0.0, -3.0, 1.5, 2.0, -1.5),
        ];

        write_centers(&path, &points).expect("write");
        assert_eq!(read_centers(&path, 0).expect("read"), points);
    }

    #[test]
    fn rewriting_failed_centers_replaces_the_previous_list() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("failed_centers.txt");
        let first = vec![
            ParameterPoint::new(0.0, 1.0, 0.0, 0.0, 0.0),
            ParameterPoint::new(0.0, 2.0, 0.0, 0.0, 0.0),
        ];
        let second = vec![ParameterPoint::new(0.0, 3.0, 0.0, 0.0, 0.0)];

        write_centers(&path, &first).expect("first write");
        write_centers(&path, &second).expect("second write");

        let content = std::fs::read_to_string(&path).expect("centers readable");
        assert_eq!(
            content,
            "0.00000000e+00 3.00000000e+00 0.00000000e+00 0.00000000e+00 0.00000000e+00\n"
        );
        assert_eq!(read_centers(&path, 0).expect("read"), second);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = read_centers(&temp.path().join("centers.txt"), 0).expect_err("missing file");
        assert_eq!(error.placeholder(), "IO.CENTERS_READ");
    }
}
