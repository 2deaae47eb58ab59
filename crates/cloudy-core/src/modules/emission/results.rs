use super::model::LineIntensities;
use crate::common::EmissivitySchema;
use crate::common::schema::INTENSITY_UNIT;
use crate::domain::{ComputeResult, GridError, PARAMETER_COLUMNS, ParameterPoint};
use crate::modules::serialization::{format_row, write_text_artifact};
use std::path::Path;

const VALUE_PRECISION: usize = 8;

const PARAMETER_UNITS: [&str; 5] = [
    "log(Zsolar)",
    "log(cm^-3)",
    "log(km s^-1)",
    "log(G0)",
    "log(pc)",
];

/// One row per parameter point: the five inputs followed by one intensity
/// per emission line, or NaN for every line when the run gave no result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    schema: EmissivitySchema,
    rows: Vec<Vec<f64>>,
}

impl ResultsTable {
    pub fn new(schema: EmissivitySchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn column_count(&self) -> usize {
        PARAMETER_COLUMNS.len() + self.schema.line_count()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_result(&mut self, point: &ParameterPoint, intensities: &LineIntensities) {
        let mut row = point.values().to_vec();
        row.extend_from_slice(intensities.values());
        self.rows.push(row);
    }

    pub fn push_missing(&mut self, point: &ParameterPoint) {
        let mut row = point.values().to_vec();
        row.extend(std::iter::repeat_n(f64::NAN, self.schema.line_count()));
        self.rows.push(row);
    }

    /// `Column k: <name> [<unit>]` for every column, parameters first.
    pub fn header(&self) -> String {
        let mut header = String::from("\n");
        let parameters = PARAMETER_COLUMNS.into_iter().zip(PARAMETER_UNITS);
        let lines = self
            .schema
            .lines()
            .iter()
            .map(|line| (line.label, INTENSITY_UNIT));

        for (index, (name, unit)) in parameters.chain(lines).enumerate() {
            header.push_str(&format!("Column {}: {} [{}]\n", index, name, unit));
        }
        header
    }

    /// Renders the header as `# ` comment lines, then one space-separated
    /// row of `%.8e` values per point.
    pub fn render(&self) -> String {
        let mut content = String::new();
        let header = self.header();
        let commented = header.replace('\n', "\n# ");
        content.push_str("# ");
        content.push_str(&commented);
        content.push('\n');

        for row in &self.rows {
            content.push_str(&format_row(row, VALUE_PRECISION));
            content.push('\n');
        }
        content
    }

    pub fn write(&self, path: &Path) -> ComputeResult<()> {
        write_text_artifact(path, &self.render()).map_err(|source| {
            GridError::io_system(
                "IO.RESULTS_WRITE",
                format!(
                    "failed to write results table '{}': {}",
                    path.display(),
                    source
                ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ResultsTable;
    use crate::common::EMISSIVITY_SCHEMA;
    use crate::domain::ParameterPoint;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn header_names_twenty_one_columns_with_units() {
        let table = ResultsTable::new(EMISSIVITY_SCHEMA);
        let header = table.header();
        let lines: Vec<&str> = header.lines().collect();

        assert_eq!(table.column_count(), 21);
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Column 0: log_metallicity [log(Zsolar)]");
        assert_eq!(lines[5], "Column 4: log_radius [log(pc)]");
        assert_eq!(lines[6], "Column 5: I_ly_alpha [erg s^-1 cm^-2]");
        assert_eq!(lines[21], "Column 20: I_o3_4958 [erg s^-1 cm^-2]");
    }

    #[test]
    fn missing_rows_are_nan_padded_and_rendered_as_comments_then_rows() {
        let mut table = ResultsTable::new(EMISSIVITY_SCHEMA);
        table.push_missing(&ParameterPoint::new(-1.0, 2.0, 0.5, 0.0, 1.0));

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "# ");
        assert_eq!(lines[1], "# Column 0: log_metallicity [log(Zsolar)]");
        assert_eq!(lines[22], "# ");
        assert_eq!(lines.len(), 24);

        let fields: Vec<&str> = lines[23].split(' ').collect();
        assert_eq!(fields.len(), 21);
        assert_eq!(fields[0], "-1.00000000e+00");
        assert_eq!(fields[1], "2.00000000e+00");
        assert!(fields[5..].iter().all(|field| *field == "nan"));
    }

    #[test]
    fn rewriting_results_produces_identical_bytes() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("I_line_values_without_reversing.txt");
        let mut table = ResultsTable::new(EMISSIVITY_SCHEMA);
        table.push_missing(&ParameterPoint::new(0.0, 1.0, 0.0, 0.0, 0.0));

        table.write(&path).expect("first write");
        let first = fs::read(&path).expect("results readable");
        table.write(&path).expect("second write");
        let second = fs::read(&path).expect("results readable");

        assert_eq!(first, second);
        assert!(first.ends_with(b"nan\n"));
        assert!(!first.contains(&b'\r'));
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let table = ResultsTable::new(EMISSIVITY_SCHEMA);
        let error = table
            .write(&temp.path().join("missing/results.txt"))
            .expect_err("parent directory does not exist");
        assert_eq!(error.placeholder(), "IO.RESULTS_WRITE");
        assert_eq!(error.exit_code(), 3);
    }
}
