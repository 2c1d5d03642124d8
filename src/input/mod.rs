//! Text input layer
//!
//! - [`numeric`]: whitespace/comma-delimited numeric lines (solution files, step sizes)
//! - [`marker`]: log files where only marker-prefixed lines carry data

pub mod marker;
pub mod numeric;

pub use marker::{MarkerFormat, ADJOINT_TUPLE_WIDTH, DEFAULT_MARKER};
pub use numeric::{load_column, load_vector, parse_numeric_lines, read_optional};
