pub mod config;
pub mod schema;

pub use config::GridConfig;
pub use schema::{EMISSIVITY_SCHEMA, EmissionLine, EmissivitySchema};
