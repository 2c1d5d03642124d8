//! Export of sweep results
//!
//! # Architecture
//!
//! [`ErrorTable`] is the format-independent result of a sweep. The
//! [`TableExporter`] trait abstracts the file format; each format lives in its own
//! sub-module, so a new format is a new file rather than a change to the studies.
//!
//! | Format | Module |
//! |--------|--------|
//! | CSV    | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use conv_rs::output::export::{CsvExporter, TableExporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export(&table, Path::new("data/lsrk.csv"))?;
//! ```

pub mod csv;
pub mod table;

pub use csv::{export_table_csv, format_number, CsvConfig, CsvExporter, CsvMetadata, NumberFormat};
pub use table::{Column, ErrorTable};

use std::path::Path;

use crate::error::Result;

/// Abstraction trait for all table formats
///
/// Implementations write the whole table in one call and return an error if the
/// destination cannot be written. NaN cells must be written, not rejected.
pub trait TableExporter {
    fn export(&self, table: &ErrorTable, path: &Path) -> Result<()>;
}
