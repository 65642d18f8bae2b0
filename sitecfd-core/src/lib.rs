//! Core data models for sitecfd.
//!
//! Two headerless, tab-separated inputs feed the pipeline:
//!
//! - read-density tables (`.sgr`): `chromosome, position, reads`, one row per bin
//! - reference-site tables: `chromosome, name, position, strand`
//!
//! Both are parsed into in-memory tables ([models::ReadDensityTable] and
//! [models::SiteTable]). Gzip-compressed files are read transparently.

pub mod errors;
pub mod models;
pub mod utils;
