use crate::common::EmissivitySchema;
use crate::common::config::{DEFAULT_COSMIC_RAY_BACKGROUND, DEFAULT_REDSHIFT};
use crate::domain::ParameterPoint;
use std::fmt::Write as _;

const PREAMBLE: [&str; 2] = ["title Parallel Plane Slab DT", "set nend 4000"];

const STOP_AND_PRINT: [&str; 4] = [
    "stop temperature off",
    "iterate to converge",
    "print line sort intensity",
    "save lines, emissivity, \"_em.str\"",
];

// Directive spelling is read by the simulator as-is.
const SAVE_DIRECTIVES: [&str; 17] = [
    "end of lines",
    "save lines, array, \".lines\"",
    "save grain abundance \".gbu\"",
    "save performance \".per\"",
    "save overveiw last \".ovr\"",
    "save monitors last \".asr\"",
    "save temperature last \".tem\"",
    "save overview \".ovr1\"",
    "save molecules last \".mol\"",
    "save molecules \".mol1\"",
    "save heating \".het\"",
    "save cooling \".col\" # Column densities",
    "save dr last \".dr\"",
    "save results last \".rlt\"",
    "save continuum last \".con\" units microns",
    "Save line labels [long] [no index] \".labels\"",
    "print line optical depths \".tau\"",
];

/// Fixed simulator input deck with one parameter point substituted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDeckTemplate {
    pub redshift: f64,
    pub cosmic_ray_background: f64,
    pub schema: EmissivitySchema,
}

impl Default for InputDeckTemplate {
    fn default() -> Self {
        Self {
            redshift: DEFAULT_REDSHIFT,
            cosmic_ray_background: DEFAULT_COSMIC_RAY_BACKGROUND,
            schema: EmissivitySchema::default(),
        }
    }
}

impl InputDeckTemplate {
    pub fn render(&self, point: &ParameterPoint) -> String {
        let mut deck = String::new();
        for line in PREAMBLE {
            push_line(&mut deck, line);
        }

        let _ = writeln!(deck, "table ISM factor {:.5} log", point.log_isrf);
        push_line(&mut deck, "radius 30");
        let _ = writeln!(deck, "hden {:.5} log", point.log_hden);
        let _ = writeln!(deck, "CMB, z={:.5}", self.redshift);
        push_line(&mut deck, "abundances ISM");
        let _ = writeln!(deck, "metals and grains {:.5} log", point.log_metallicity);
        let _ = writeln!(deck, "turbulence {:.5} km/sec log", point.log_turbulence);
        let _ = writeln!(
            deck,
            "cosmic rays background {:.3} linear",
            self.cosmic_ray_background
        );
        let _ = writeln!(deck, "stop thickness {:.5} log parsec", point.log_radius);

        for line in STOP_AND_PRINT {
            push_line(&mut deck, line);
        }
        for line in self.schema.lines() {
            push_line(&mut deck, line.request);
        }
        for line in SAVE_DIRECTIVES {
            push_line(&mut deck, line);
        }

        deck
    }
}

fn push_line(deck: &mut String, line: &str) {
    deck.push_str(line);
    deck.push('\n');
}
