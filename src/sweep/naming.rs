//! On-disk naming contract
//!
//! Every path the pipeline reads or writes is built here, from parameter values
//! only. Upstream solver drivers write files under these names, so changing any
//! function in this module breaks compatibility with existing data directories.
//!
//! | File | Name |
//! |------|------|
//! | grid reference | `ref_<grid_pts_1d>.txt` |
//! | tolerance-sweep result | `<method>_<tolerance label>.txt` |
//! | splitting result | `splitting_<order>_<step label>.txt` |
//! | adjoint reference | `asa_reference.txt` |
//! | adjoint log | `asa_order_<order>.log` |
//! | adjoint step sizes | `step_sizes.txt` |
//! | LSRK table | `lsrk.csv` |
//! | splitting table | `splitting.csv` |
//! | adjoint table | `error_asa_order_<order>.csv` |
//! | plots | `lsrk.png`, `splitting.png`, `convergence_<component>.png`, `reference_fields.png` |
//!
//! ## Labels
//!
//! - **Tolerance**: normalized scientific notation, shortest mantissa, bare exponent:
//!   `0.01 → "1e-2"`, `0.0015 → "1.5e-3"`.
//! - **Step size**: a whole step `≥ 1` is written as an integer (`1`, `2`). Anything
//!   else is written with 20 fixed decimals and its leading zeros removed:
//!   `0.5 → ".50000000000000000000"`, `0.0078125 → ".00781250000000000000"`.

use std::path::{Path, PathBuf};

/// Normalized text form of a tolerance
pub fn tolerance_label(value: f64) -> String {
    format!("{value:e}")
}

/// Text form of a step size used in splitting result names
pub fn step_label(step: f64) -> String {
    if step >= 1.0 && step.fract() == 0.0 {
        format!("{step:.0}")
    } else {
        format!("{step:.20}").trim_start_matches('0').to_string()
    }
}

pub fn reference_path(data_dir: &Path, grid_pts_1d: usize) -> PathBuf {
    data_dir.join(format!("ref_{grid_pts_1d}.txt"))
}

pub fn method_result_path(data_dir: &Path, method: &str, tolerance_label: &str) -> PathBuf {
    data_dir.join(format!("{method}_{tolerance_label}.txt"))
}

pub fn splitting_result_path(data_dir: &Path, order: u32, step: f64) -> PathBuf {
    data_dir.join(format!("splitting_{order}_{}.txt", step_label(step)))
}

pub fn adjoint_reference_path(data_dir: &Path) -> PathBuf {
    data_dir.join("asa_reference.txt")
}

pub fn adjoint_log_path(data_dir: &Path, order: u32) -> PathBuf {
    data_dir.join(format!("asa_order_{order}.log"))
}

pub fn step_sizes_path(data_dir: &Path) -> PathBuf {
    data_dir.join("step_sizes.txt")
}

pub fn lsrk_table_path(data_dir: &Path) -> PathBuf {
    data_dir.join("lsrk.csv")
}

pub fn splitting_table_path(data_dir: &Path) -> PathBuf {
    data_dir.join("splitting.csv")
}

pub fn adjoint_table_path(data_dir: &Path, order: u32) -> PathBuf {
    data_dir.join(format!("error_asa_order_{order}.csv"))
}

pub fn lsrk_plot_path(data_dir: &Path) -> PathBuf {
    data_dir.join("lsrk.png")
}

pub fn splitting_plot_path(data_dir: &Path) -> PathBuf {
    data_dir.join("splitting.png")
}

/// One convergence plot per adjoint component (`y`, `dgdy_0`, `dgdp`)
pub fn adjoint_plot_path(data_dir: &Path, component: &str) -> PathBuf {
    data_dir.join(format!("convergence_{component}.png"))
}

pub fn reference_fields_plot_path(data_dir: &Path) -> PathBuf {
    data_dir.join("reference_fields.png")
}
