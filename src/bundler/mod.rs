//! Bundling pipeline
//!
//! The pieces run in this order for every unit variant:
//! - loader: read listed files, filter comments, wrap by type
//! - header: prepend the build header
//! - template: substitute placeholders and derive output names
//! - writer: write the artifacts
//!
//! [`orchestrator`] drives them for every manifest of a unit kind.

pub mod filter;
pub mod header;
pub mod loader;
pub mod orchestrator;
pub mod template;
pub mod wrap;
pub mod writer;

pub use orchestrator::{BuildReport, Orchestrator};
