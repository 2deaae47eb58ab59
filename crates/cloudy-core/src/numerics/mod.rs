pub mod integration;

pub use integration::{SimpsonError, integrate_simpson};
