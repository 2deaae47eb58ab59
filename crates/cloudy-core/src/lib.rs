//! Drivers for a grid of Cloudy photoionization runs: input-deck
//! generation, run-status scanning and line-intensity integration.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
