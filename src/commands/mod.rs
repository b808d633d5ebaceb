//! Command implementations for the sfmc-build CLI

pub mod build;
pub mod completions;
