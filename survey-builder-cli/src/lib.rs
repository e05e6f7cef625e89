//! Support code for the `survey-builder` command line tool.

pub mod config;
pub mod logging;
