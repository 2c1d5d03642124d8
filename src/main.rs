//! conv-rs: measure solver output against its reference and tabulate the errors
//!
//! ```text
//! conv-rs --method Splitting --plot --data-dir data
//! ```

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use conv_rs::cli::Args;
use conv_rs::study::{load_reference, run_study};

fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let kind = args.study_kind();
    let config = args.study_config();

    print_section(&format!("{kind} study"));
    println!("Data directory : {}", config.data_dir.display());

    let reference = load_reference(kind, &config)
        .with_context(|| format!("cannot load the {kind} reference"))?;
    if let Some(grid) = reference.as_grid() {
        println!("Reference solution generated in {}s", grid.wall_time());
    }
    println!("Metric         : {}", reference.metric().name());

    let start = Instant::now();
    let report =
        run_study(kind, &config, &reference).with_context(|| format!("{kind} study failed"))?;

    for warning in report.warnings() {
        println!("{warning}");
    }

    print_section("Outputs");
    for written in report.tables() {
        println!(
            "  {} ({} rows x {} columns)",
            written.path.display(),
            written.table.n_rows(),
            written.table.n_columns()
        );
    }
    for plot in report.plots() {
        println!("  {}", plot.display());
    }

    println!(
        "\n✓ {kind} study done in {:.2}s ({} warnings)",
        start.elapsed().as_secs_f64(),
        report.warnings().len()
    );
    Ok(())
}
