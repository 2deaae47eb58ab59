pub mod centers;
pub mod emission;
pub mod inputgen;
pub mod runlog;
pub mod scan;
pub mod serialization;

mod traits;

pub use traits::ModuleExecutor;
