//! Marker-line (log-style) reader
//!
//! Solver logs mix free-form diagnostics with result lines. Only lines that begin
//! with the marker token are significant; what follows the first `:` is a numeric
//! tuple of fixed width:
//!
//! ```text
//! [ARKODE] step 128 accepted
//! ASA: 1.3714668907918908e+00, 2.9993262096098472e-01, 7.0311273442238753e-01
//! ASA result 2: 1.37146689 0.29993355 0.70311479
//! ```
//!
//! Tuples are returned in file order. The N-th tuple belongs to the N-th declared
//! step size; nothing in the line itself identifies the step.

use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::input::numeric::{parse_value, read_optional, split_fields};

/// Marker token used by the adjoint-sensitivity driver
pub const DEFAULT_MARKER: &str = "ASA";

/// Tuple width of an adjoint result: solution norm, dg/dy0 norm, dg/dp norm
pub const ADJOINT_TUPLE_WIDTH: usize = 3;

/// How significant lines are recognized and how wide their tuples are
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFormat {
    pub marker: String,
    pub width: usize,
}

impl Default for MarkerFormat {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            width: ADJOINT_TUPLE_WIDTH,
        }
    }
}

impl MarkerFormat {
    pub fn new(marker: impl Into<String>, width: usize) -> Self {
        Self { marker: marker.into(), width }
    }

    /// Parse one line; `Ok(None)` when the line is not significant
    pub fn parse_line(&self, raw: &str, path: &Path, line: usize) -> Result<Option<Vec<f64>>> {
        let trimmed = raw.trim_start();
        if !trimmed.starts_with(self.marker.as_str()) {
            return Ok(None);
        }

        let Some((_, payload)) = trimmed.split_once(':') else {
            return Err(AnalysisError::MissingColon { path: path.to_path_buf(), line });
        };

        let fields = split_fields(payload.trim());
        if fields.len() != self.width {
            return Err(AnalysisError::TupleWidth {
                path: path.to_path_buf(),
                line,
                expected: self.width,
                found: fields.len(),
            });
        }

        fields
            .into_iter()
            .map(|token| parse_value(token, path, line))
            .collect::<Result<Vec<f64>>>()
            .map(Some)
    }

    /// Parse all significant lines of `text`
    pub fn parse(&self, text: &str, path: &Path) -> Result<Vec<Vec<f64>>> {
        let mut tuples = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            if let Some(tuple) = self.parse_line(raw, path, index + 1)? {
                tuples.push(tuple);
            }
        }
        Ok(tuples)
    }

    /// Read and parse a log file; `Ok(None)` when the file does not exist
    pub fn load(&self, path: &Path) -> Result<Option<Vec<Vec<f64>>>> {
        match read_optional(path)? {
            Some(text) => self.parse(&text, path).map(Some),
            None => Ok(None),
        }
    }
}
