//! Output module for sweep results
//!
//! - **Export**: error tables and their CSV serialization
//! - **Visualization**: log-log convergence plots and reference field maps
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Tables and file formats
//! │   ├── mod.rs
//! │   ├── table.rs
//! │   └── csv.rs
//! └── visualization/      ← Plots
//!     ├── mod.rs
//!     ├── config.rs
//!     ├── slopes.rs
//!     ├── convergence.rs
//!     └── fields.rs
//! ```
//!
//! Both sides consume the same [`ErrorTable`]: what is plotted is exactly what
//! is written to disk.

pub mod export;
pub mod visualization;

pub use export::{export_table_csv, CsvConfig, CsvExporter, ErrorTable, TableExporter};
pub use visualization::{plot_convergence, plot_performance, plot_reference_fields, PlotConfig};
