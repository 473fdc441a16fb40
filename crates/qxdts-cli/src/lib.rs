//! Command-line front end for the qxdts declaration generator.
//!
//! - Argument parsing (`args`)
//! - `qxdts.json` loading and merging over the emitter defaults (`config`)
//! - Loading the meta-database and writing the output file (`driver`)
//! - Env-gated tracing setup (`tracing_config`)

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
