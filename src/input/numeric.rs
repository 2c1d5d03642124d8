//! Numeric line reader
//!
//! Reads the plain-text files produced by the solvers: one or more numbers per line,
//! separated by commas when a comma is present on the line, otherwise by whitespace.
//! Blank lines and `#` comments (full-line or trailing) are ignored.
//!
//! ```text
//! # runtime, then one value per line
//! 12.4
//! 0.999871
//! 0.000102
//! ```
//!
//! Missing files are reported as `Ok(None)` so that callers can decide whether an
//! absent file is fatal (reference) or expected (sweep record).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use nalgebra::DVector;

use crate::error::{AnalysisError, Result};

// =================================================================================================
// Parsing
// =================================================================================================

/// Split the significant part of a line into value tokens
///
/// Commas win over whitespace: `"1, 2 ,3"` gives `["1", "2", "3"]`, `"1 2\t3"` gives
/// the same. Tokens are trimmed; empty tokens between commas are kept so that the
/// caller reports them as parse errors.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Parse one token as `f64`, accepting `nan` and `inf` spellings in any case
pub(crate) fn parse_value(token: &str, path: &Path, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| AnalysisError::Parse {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

/// Strip a trailing `#` comment and surrounding whitespace
fn significant(line: &str) -> &str {
    match line.split_once('#') {
        Some((head, _)) => head.trim(),
        None => line.trim(),
    }
}

/// Parse every numeric line of `text` into a row of values
///
/// Line numbers in errors are 1-based and refer to `path`.
pub fn parse_numeric_lines(text: &str, path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = significant(raw);
        if line.is_empty() {
            continue;
        }

        let row = split_fields(line)
            .into_iter()
            .map(|token| parse_value(token, path, index + 1))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

// =================================================================================================
// File access
// =================================================================================================

/// Read a whole file, mapping "not found" to `Ok(None)`
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AnalysisError::io(path, err)),
    }
}

/// Load every value of a numeric file, flattened in file order
///
/// Equivalent to reading the file as a table and concatenating its rows; this is the
/// layout of both reference and per-run solution files.
pub fn load_vector(path: &Path) -> Result<Option<DVector<f64>>> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };

    let values: Vec<f64> = parse_numeric_lines(&text, path)?
        .into_iter()
        .flatten()
        .collect();

    log::debug!("loaded {} values from {}", values.len(), path.display());
    Ok(Some(DVector::from_vec(values)))
}

/// Load a file holding one value per line
///
/// A line with more than one value is a tuple-width error.
pub fn load_column(path: &Path) -> Result<Option<Vec<f64>>> {
    let Some(text) = read_optional(path)? else {
        return Ok(None);
    };

    let mut column = Vec::new();
    let mut line_number = 0;
    for raw in text.lines() {
        line_number += 1;
        let line = significant(raw);
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line);
        if fields.len() != 1 {
            return Err(AnalysisError::TupleWidth {
                path: path.to_path_buf(),
                line: line_number,
                expected: 1,
                found: fields.len(),
            });
        }
        column.push(parse_value(fields[0], path, line_number)?);
    }

    Ok(Some(column))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn path() -> &'static Path {
        Path::new("mem.txt")
    }

    #[test]
    fn test_split_prefers_commas() {
        assert_eq!(split_fields("1, 2 ,3"), vec!["1", "2", "3"]);
        assert_eq!(split_fields("1 2\t3"), vec!["1", "2", "3"]);
        assert_eq!(split_fields("1,,3"), vec!["1", "", "3"]);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# header\n\n1.5\n2 3 # trailing\n   \n";
        let rows = parse_numeric_lines(text, path()).unwrap();
        assert_eq!(rows, vec![vec![1.5], vec![2.0, 3.0]]);
    }

    #[test]
    fn test_parse_accepts_nan_spellings() {
        let rows = parse_numeric_lines("nan, NaN, inf", path()).unwrap();
        assert!(rows[0][0].is_nan());
        assert!(rows[0][1].is_nan());
        assert_eq!(rows[0][2], f64::INFINITY);
    }

    #[test]
    fn test_parse_reports_line_and_token() {
        let err = parse_numeric_lines("1.0\n2.0\n3.x\n", path()).unwrap_err();
        match err {
            AnalysisError::Parse { line, token, .. } => {
                assert_eq!(line, 3);
                assert_eq!(token, "3.x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_comma_field_is_an_error() {
        assert!(parse_numeric_lines("1,,3", path()).is_err());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(load_vector(&missing).unwrap().is_none());
        assert!(load_column(&missing).unwrap().is_none());
    }

    #[test]
    fn test_load_vector_flattens_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.25").unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "3").unwrap();

        let v = load_vector(file.path()).unwrap().unwrap();
        assert_eq!(v.as_slice(), &[0.25, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_load_column_rejects_wide_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.5").unwrap();
        writeln!(file, "0.25 0.125").unwrap();

        let err = load_column(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::TupleWidth { line: 2, found: 2, .. }));
    }
}
