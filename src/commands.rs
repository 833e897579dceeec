//! Implementation of buildname CLI commands.

pub mod generate;
pub mod short;
