//! CSV export of error tables
//!
//! The output is the layout `numpy.loadtxt`/`pandas.read_csv(comment="#")` readers
//! expect: an optional block of metadata comments, the column names as a comment
//! line, then one numeric row per sweep value.
//!
//! # Example
//!
//! ```rust,ignore
//! use conv_rs::output::export::{export_table_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::for_study("Splitting", 1024));
//! export_table_csv(&table, "data/splitting.csv", Some(&config))?;
//! ```
//!
//! **Output** (`splitting.csv`, metadata omitted):
//! ```csv
//! # h, Order 1 Error, Order 2 Error
//! 7.8125000000000000e-3,1.2023116473015443e-4,nan
//! 1.5625000000000000e-2,2.4039877123411097e-4,3.0172663459103452e-7
//! ```
//!
//! NaN cells are written as `nan` and are never rejected: they are how a missing
//! or diverged run reaches the plots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::output::export::table::ErrorTable;

// =============================================================================
// Configuration Structures
// =============================================================================

/// How cell values are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// `{:.prec$e}`, e.g. `1.2500000000000000e-3`
    Scientific(usize),
    /// `{:.prec$}`, e.g. `0.001250`
    Fixed(usize),
}

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `header_separator`: Separator between column names in the header (default: ", ")
/// - `number_format`: Cell formatting (default: scientific, 16 digits)
/// - `include_metadata`: Add comment lines above the header
/// - `metadata`: Run information to include
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Separator between header names (default: ", ")
    pub header_separator: String,

    /// Number formatting (default: `Scientific(16)`)
    pub number_format: NumberFormat,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header_separator: ", ".to_string(),
            number_format: NumberFormat::Scientific(16),
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: fixed-point output with `precision` decimals
    pub fn fixed(mut self, precision: usize) -> Self {
        self.number_format = NumberFormat::Fixed(precision);
        self
    }

    /// Builder pattern: scientific output with `precision` mantissa digits
    pub fn scientific(mut self, precision: usize) -> Self {
        self.number_format = NumberFormat::Scientific(precision);
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Study name (e.g., "LSRK", "Splitting", "Adjoint order 3")
    pub study: Option<String>,

    /// Reference file the errors were measured against
    pub reference: Option<String>,

    /// Grid side length of the PDE reference
    pub grid_pts_1d: Option<usize>,

    /// Divergence ceiling applied to the errors
    pub ceiling: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn for_study(study: &str, grid_pts_1d: usize) -> Self {
        Self {
            study: Some(study.to_string()),
            grid_pts_1d: Some(grid_pts_1d),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Convergence Error Table")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(study) = &metadata.study {
        writeln!(out, "# Study: {}", study)?;
    }
    if let Some(reference) = &metadata.reference {
        writeln!(out, "# Reference: {}", reference)?;
    }
    if let Some(n) = metadata.grid_pts_1d {
        writeln!(out, "# Grid: {}x{}", n, n)?;
    }
    if let Some(ceiling) = metadata.ceiling {
        writeln!(out, "# Divergence ceiling: {}", ceiling)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format one cell; non-finite values use the numpy spelling
pub fn format_number(value: f64, format: NumberFormat) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    match format {
        NumberFormat::Scientific(prec) => format!("{:.prec$e}", value, prec = prec),
        NumberFormat::Fixed(prec) => format!("{:.prec$}", value, prec = prec),
    }
}

fn write_table<W: Write>(out: &mut W, table: &ErrorTable, config: &CsvConfig) -> std::io::Result<()> {
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(out, metadata)?;
        }
    }

    writeln!(out, "# {}", table.headers().join(&config.header_separator))?;

    let delimiter = config.delimiter.to_string();
    for i in 0..table.n_rows() {
        let line: Vec<String> = table
            .row(i)
            .into_iter()
            .map(|value| format_number(value, config.number_format))
            .collect();
        writeln!(out, "{}", line.join(&delimiter))?;
    }

    out.flush()
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export an error table to CSV
///
/// # Errors
///
/// - `Export` if the table has no rows
/// - `Io` if the file cannot be created or written
pub fn export_table_csv(
    table: &ErrorTable,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    if table.n_rows() == 0 {
        return Err(AnalysisError::Export {
            path: output_path.to_path_buf(),
            reason: "table has no rows".to_string(),
        });
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let file = File::create(output_path).map_err(|e| AnalysisError::io(output_path, e))?;
    let mut out = BufWriter::new(file);
    write_table(&mut out, table, configuration).map_err(|e| AnalysisError::io(output_path, e))?;

    log::info!(
        "wrote {} ({} rows x {} columns)",
        output_path.display(),
        table.n_rows(),
        table.n_columns()
    );
    Ok(())
}

/// CSV implementation of [`super::TableExporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl super::TableExporter for CsvExporter {
    fn export(&self, table: &ErrorTable, path: &Path) -> Result<()> {
        export_table_csv(table, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_numeric_lines;
    use nalgebra::DMatrix;
    use std::fs;
    use tempfile::NamedTempFile;

    fn order_table() -> ErrorTable {
        let errors = DMatrix::from_row_slice(3, 2, &[1e-3, f64::NAN, 2.5e-4, 1e-6, 6.25e-5, 2e-7]);
        ErrorTable::metric_major(
            "h",
            vec![0.25, 0.5, 1.0],
            true,
            &["Order 1".to_string(), "Order 2".to_string()],
            vec![("Error", errors)],
        )
        .unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.00125, NumberFormat::Scientific(3)), "1.250e-3");
        assert_eq!(format_number(0.00125, NumberFormat::Fixed(4)), "0.0013");
        assert_eq!(format_number(f64::NAN, NumberFormat::Fixed(4)), "nan");
        assert_eq!(format_number(f64::NEG_INFINITY, NumberFormat::Scientific(2)), "-inf");
    }

    #[test]
    fn test_export_header_and_rows() {
        let file = NamedTempFile::new().unwrap();
        export_table_csv(&order_table(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let first = content.lines().next().unwrap();
        assert_eq!(first, "# h, Order 1 Error, Order 2 Error");

        let rows = parse_numeric_lines(&content, file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(rows[0][0], 0.25);
        assert!(rows[0][2].is_nan());
        assert_eq!(rows[2][2], 2e-7);
    }

    #[test]
    fn test_export_with_metadata() {
        let file = NamedTempFile::new().unwrap();
        let mut metadata = CsvMetadata::for_study("Splitting", 64);
        metadata.add_custom("Orders".to_string(), "1, 2".to_string());
        let config = CsvConfig::default().fixed(6).with_metadata(metadata);

        export_table_csv(&order_table(), file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# Convergence Error Table"));
        assert!(content.contains("# Study: Splitting"));
        assert!(content.contains("# Grid: 64x64"));
        assert!(content.contains("# Orders: 1, 2"));
        assert!(content.contains("0.250000,0.001000,nan"));
    }

    #[test]
    fn test_exporter_trait_uses_its_config() {
        use crate::output::export::TableExporter;

        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::new(CsvConfig::default().delimiter(';').fixed(2));
        exporter.export(&order_table(), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("0.25;0.00;nan"));
    }

    #[test]
    fn test_invalid_directory_is_an_error() {
        let result = export_table_csv(&order_table(), "/nonexistent/dir/table.csv", None);
        assert!(result.is_err());
    }
}
