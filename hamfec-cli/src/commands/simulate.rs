use anyhow::{bail, Context, Result};
use hamfec_core::{
    constants::DATA_BITS,
    simulation::{run_sweep, SweepConfig, SweepPoint, THEORETICAL_LOSS_LIMIT},
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use tracing::info;

use super::make_rng;

#[derive(Serialize)]
struct SweepReport<'a> {
    config: &'a SweepConfig,
    seed: Option<u64>,
    theoretical_limit: f64,
    points: &'a [SweepPoint],
}

/// Run the sweep and return its points
pub fn run(config: &SweepConfig, seed: Option<u64>, progress: bool) -> Result<Vec<SweepPoint>> {
    if config.sequence_len % DATA_BITS != 0 {
        bail!(
            "Sequence length {} must be a multiple of {}",
            config.sequence_len,
            DATA_BITS
        );
    }

    let bar = if progress {
        let bar = ProgressBar::new(config.steps as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .context("Invalid progress template")?,
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut rng = make_rng(seed);
    let points = run_sweep(config, &mut rng, |point| {
        bar.set_message(format!("p_loss = {:.2}", point.p_loss));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    Ok(points)
}

pub fn execute(
    config: SweepConfig,
    seed: Option<u64>,
    output: Option<&str>,
    progress: bool,
) -> Result<()> {
    info!(
        "Running simulation: {} bits, {} trials per point, {} points",
        config.sequence_len, config.trials, config.steps
    );

    let points = run(&config, seed, progress)?;

    println!("\n=== Recovery vs. channel loss ===");
    println!("{:>10}  {:>10}", "P_loss %", "Recovered %");
    let mut limit_shown = false;
    for point in &points {
        if !limit_shown && point.p_loss > THEORETICAL_LOSS_LIMIT {
            println!(
                "{:->10}  theoretical limit 2/7 = {:.1}%",
                "",
                THEORETICAL_LOSS_LIMIT * 100.0
            );
            limit_shown = true;
        }
        println!(
            "{:>10.1}  {:>10.2}",
            point.p_loss * 100.0,
            point.recovery_percent
        );
    }

    if let Some(output_path) = output {
        let report = SweepReport {
            config: &config,
            seed,
            theoretical_limit: THEORETICAL_LOSS_LIMIT,
            points: &points,
        };
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize sweep results")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Sweep results written to: {}", output_path);
    }

    Ok(())
}
