//! Column layout of the simulator's `_em.str` emissivity table.
//!
//! The same ordered list drives three things: the line requests written
//! into each `.in` file, the column split of the emissivity table, and the
//! labels of the results table. Keeping them in one place is what ties an
//! integrated intensity to the physical line it belongs to.

pub const RADIUS_COLUMN: &str = "radius";
pub const INTENSITY_UNIT: &str = "erg s^-1 cm^-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionLine {
    /// Column key in the emissivity table.
    pub key: &'static str,
    /// Results-table label for the integrated intensity.
    pub label: &'static str,
    /// Line request directive inside the `save lines, emissivity` block.
    pub request: &'static str,
}

impl EmissionLine {
    const fn new(key: &'static str, label: &'static str, request: &'static str) -> Self {
        Self {
            key,
            label,
            request,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissivitySchema {
    lines: &'static [EmissionLine],
}

pub const EMISSION_LINES: [EmissionLine; 16] = [
    EmissionLine::new("ly_alpha", "I_ly_alpha", "H  1 1215.67 # Lya"),
    EmissionLine::new("h_alpha", "I_h_alpha", "H  1 6562.80 # Ha"),
    EmissionLine::new("h_beta", "I_h_beta", "H  1 4861.32 # Hb"),
    EmissionLine::new("CO10", "I_co_10", "CO  2600.05m # CO(1-0)"),
    EmissionLine::new("CO21", "I_co_21", "CO  1300.05m # CO(2-1)"),
    EmissionLine::new("CO32", "I_co_32", "CO  866.727m # CO(3-2)"),
    EmissionLine::new("CO43", "I_co_43", "CO  650.074m # CO(4-3)"),
    EmissionLine::new("CO54", "I_co_54", "CO  520.089m # CO(5-4)"),
    EmissionLine::new("CO65", "I_co_65", "CO  433.438m # CO(6-5)"),
    EmissionLine::new("CO76", "I_co_76", "CO  371.549m # CO(7-6)"),
    EmissionLine::new("CO87", "I_co_87", "CO  325.137m # CO(8-7)"),
    EmissionLine::new("13CO", "I_13co", "\"^13CO\" 2719.67m"),
    EmissionLine::new("C2", "I_c2", "C  2 157.636m"),
    EmissionLine::new("O3_88um", "I_o3_88", "O  3 88.3323m"),
    EmissionLine::new("O3_5006um", "I_o3_5006", "O  3 5006.84 # wavelength in Angstrom"),
    EmissionLine::new("O3_4958um", "I_o3_4958", "O  3 4958.91 # wavelength in Angstrom"),
];

pub const EMISSIVITY_SCHEMA: EmissivitySchema = EmissivitySchema {
    lines: &EMISSION_LINES,
};

impl EmissivitySchema {
    pub const fn lines(&self) -> &'static [EmissionLine] {
        self.lines
    }

    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Emissivity-table width: the radius column followed by one column per line.
    pub const fn column_count(&self) -> usize {
        self.lines.len() + 1
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(RADIUS_COLUMN).chain(self.lines.iter().map(|line| line.key))
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.column_keys().position(|candidate| candidate == key)
    }
}

impl Default for EmissivitySchema {
    fn default() -> Self {
        EMISSIVITY_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::{EMISSIVITY_SCHEMA, RADIUS_COLUMN};
    use std::collections::BTreeSet;

    #[test]
    fn radius_leads_sixteen_emission_columns() {
        assert_eq!(EMISSIVITY_SCHEMA.line_count(), 16);
        assert_eq!(EMISSIVITY_SCHEMA.column_count(), 17);
        assert_eq!(EMISSIVITY_SCHEMA.column_keys().next(), Some(RADIUS_COLUMN));
        assert_eq!(EMISSIVITY_SCHEMA.column_index("ly_alpha"), Some(1));
        assert_eq!(EMISSIVITY_SCHEMA.column_index("O3_4958um"), Some(16));
        assert_eq!(EMISSIVITY_SCHEMA.column_index("missing"), None);
    }

    #[test]
    fn keys_and_labels_are_unique() {
        let keys: BTreeSet<_> = EMISSIVITY_SCHEMA.column_keys().collect();
        let labels: BTreeSet<_> = EMISSIVITY_SCHEMA
            .lines()
            .iter()
            .map(|line| line.label)
            .collect();
        assert_eq!(keys.len(), EMISSIVITY_SCHEMA.column_count());
        assert_eq!(labels.len(), EMISSIVITY_SCHEMA.line_count());
    }
}
