//! Consistency checker for the virtual pinball table catalog.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod rules;
