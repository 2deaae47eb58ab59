use crate::common::EmissivitySchema;
use crate::domain::{ComputeResult, GridError};
use crate::numerics::integrate_simpson;

/// Parsed `_em.str` rows together with the schema that names their columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissivityTable {
    schema: EmissivitySchema,
    rows: Vec<Vec<f64>>,
}

impl EmissivityTable {
    pub(crate) fn new(schema: EmissivitySchema, rows: Vec<Vec<f64>>) -> Self {
        Self { schema, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn radius(&self) -> Vec<f64> {
        self.column_at(0)
    }

    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        self.schema.column_index(key).map(|index| self.column_at(index))
    }

    fn column_at(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    /// Drops every row before the simulator's last restart; see
    /// [`converged_start_index`].
    pub fn converged(mut self, threshold: f64) -> Self {
        let start = converged_start_index(&self.radius(), threshold);
        self.rows.drain(..start);
        self
    }

    /// Simpson integral of each emission column over radius, in schema order.
    pub fn integrate_lines(&self) -> ComputeResult<LineIntensities> {
        let radius = self.radius();
        let mut values = Vec::with_capacity(self.schema.line_count());

        for (offset, line) in self.schema.lines().iter().enumerate() {
            let emissivity = self.column_at(offset + 1);
            let intensity = integrate_simpson(&radius, &emissivity).map_err(|source| {
                GridError::computation(
                    "RUN.LINE_INTEGRATION",
                    format!("failed to integrate '{}' over radius: {}", line.key, source),
                )
            })?;
            values.push(intensity);
        }

        Ok(LineIntensities { values })
    }
}

/// Index of the first row of the final segment. A restart is any step
/// where radius drops by more than `threshold`; the last one wins, and a
/// table with no restart starts at 0.
pub fn converged_start_index(radius: &[f64], threshold: f64) -> usize {
    radius
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] - pair[1] > threshold)
        .map(|(index, _)| index + 1)
        .last()
        .unwrap_or(0)
}

/// Radius-integrated line intensities in erg s^-1 cm^-2.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIntensities {
    values: Vec<f64>,
}

impl LineIntensities {
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
