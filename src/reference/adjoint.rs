//! Adjoint-sensitivity reference values, one triple per convergence order
//!
//! File layout, one line per order:
//!
//! ```text
//! # order  ||y||               ||dg/dy0||           ||dg/dp||
//! 3        1.3714668933552083  0.29993355811025496  0.70311479341502030
//! 4        1.3714668933550507  0.29993355811233674  0.70311479341968513
//! ```

use std::path::Path;

use nalgebra::Vector3;

use crate::error::{AnalysisError, Result};
use crate::input::parse_numeric_lines;
use crate::input::read_optional;

/// Component names, in vector order
pub const ADJOINT_COMPONENTS: [&str; 3] = ["y", "dgdy_0", "dgdp"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdjointReference {
    entries: Vec<(u32, Vector3<f64>)>,
}

impl AdjointReference {
    /// Build from parsed rows of `order, y, dgdy_0, dgdp`
    pub fn from_rows(rows: Vec<Vec<f64>>, path: &Path) -> Result<Self> {
        let malformed = |reason: String| AnalysisError::MalformedReference {
            path: path.to_path_buf(),
            reason,
        };

        let mut reference = Self::default();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != 4 {
                return Err(malformed(format!(
                    "row {} has {} values, expected an order and 3 components",
                    index + 1,
                    row.len()
                )));
            }

            let order = row[0];
            if !(order >= 1.0 && order.fract() == 0.0 && order <= f64::from(u32::MAX)) {
                return Err(malformed(format!("'{order}' is not a convergence order")));
            }
            let order = order as u32;
            if reference.get(order).is_some() {
                return Err(malformed(format!("order {order} listed twice")));
            }

            reference.entries.push((order, Vector3::new(row[1], row[2], row[3])));
        }

        if reference.entries.is_empty() {
            return Err(malformed("no reference rows".to_string()));
        }
        Ok(reference)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_optional(path)?.ok_or_else(|| AnalysisError::ReferenceMissing {
            path: path.to_path_buf(),
        })?;
        let rows = parse_numeric_lines(&text, path).map_err(|err| {
            AnalysisError::MalformedReference {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;
        let reference = Self::from_rows(rows, path)?;
        log::info!(
            "Adjoint reference loaded for orders {:?}",
            reference.orders().collect::<Vec<_>>()
        );
        Ok(reference)
    }

    pub fn get(&self, order: u32) -> Option<&Vector3<f64>> {
        self.entries
            .iter()
            .find(|(o, _)| *o == order)
            .map(|(_, values)| values)
    }

    /// Orders in file order
    pub fn orders(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(order, _)| *order)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
