use anyhow::{Context, Result};
use colored::*;
use hamfec_core::{
    batch::{decode_batch_with_count, BatchAssembler, BatchReport},
    constants::{MAX_DATAGRAM_SIZE, STOP_SENTINEL},
    interleave::block_count,
    loss::LossModel,
};
use rand::Rng;
use std::fs;
use std::net::UdpSocket;
use tracing::{info, warn};

use super::{bit_string, make_rng};

pub fn execute(
    port: u16,
    loss: LossModel,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<()> {
    loss.validate()
        .with_context(|| format!("Invalid loss model {:?}", loss))?;

    let socket = UdpSocket::bind(("0.0.0.0", port))
        .with_context(|| format!("Failed to bind UDP port {}", port))?;
    info!("Listening on port {} (loss model: {:?})", port, loss);

    let mut rng = make_rng(seed);
    let reports = serve(&socket, loss, &mut rng)?;

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&reports)
            .with_context(|| "Failed to serialize batch reports")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Batch reports written to: {}", output_path);
    }

    Ok(())
}

/// Receive batches until the stop sentinel arrives
///
/// Every seven datagrams form a batch, which goes through the loss model and
/// is decoded. A partial batch pending at `stop` is discarded, as is any
/// datagram longer than [`MAX_DATAGRAM_SIZE`].
pub fn serve<R: Rng + ?Sized>(
    socket: &UdpSocket,
    loss: LossModel,
    rng: &mut R,
) -> Result<Vec<BatchReport>> {
    loss.validate()
        .with_context(|| format!("Invalid loss model {:?}", loss))?;

    // One spare byte: a datagram that fills it was cut short by recv_from
    let mut buf = [0u8; MAX_DATAGRAM_SIZE + 1];
    let mut assembler = BatchAssembler::new();
    let mut reports = Vec::new();

    loop {
        let (len, from) = socket
            .recv_from(&mut buf)
            .context("Failed to receive datagram")?;
        if len > MAX_DATAGRAM_SIZE {
            warn!(
                "Ignoring datagram from {} longer than {} bytes",
                from, MAX_DATAGRAM_SIZE
            );
            continue;
        }
        let payload = &buf[..len];

        if payload == STOP_SENTINEL {
            if assembler.pending() > 0 {
                warn!(
                    "Discarding partial batch of {} channels",
                    assembler.pending()
                );
                assembler.reset();
            }
            info!("Client ended the session");
            break;
        }

        let channels = match assembler.push(payload) {
            Ok(Some(channels)) => channels,
            Ok(None) => {
                info!(
                    "Received channel {} ({} bits) from {}",
                    assembler.pending(),
                    len,
                    from
                );
                continue;
            }
            Err(e) => {
                warn!("Ignoring malformed datagram from {}: {}", from, e);
                continue;
            }
        };

        match decode_received_batch(channels, loss, rng) {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => warn!("Dropping batch: {:#}", e),
        }
    }

    Ok(reports)
}

/// Apply the loss model to a complete batch and decode it
pub fn decode_received_batch<R: Rng + ?Sized>(
    channels: Vec<Vec<u8>>,
    loss: LossModel,
    rng: &mut R,
) -> Result<BatchReport> {
    // Block count comes from the intact batch, so losing every channel still decodes
    let intact: Vec<Option<&[u8]>> = channels.iter().map(|c| Some(c.as_slice())).collect();
    let count = block_count(&intact)?;

    let lossy = loss.apply(channels, rng)?;
    let report = decode_batch_with_count(&lossy.channels, count)?;
    Ok(report)
}

fn print_report(report: &BatchReport) {
    println!("\n--- Recovery and decoding ---");
    println!("Blocks (4 bits each): {}", report.blocks);
    println!("Lost channels:        {:?}", report.erased_channels);
    if report.is_complete() {
        println!("{} All blocks recovered", "✓".green());
    } else {
        println!(
            "{} {} of {} blocks uncorrectable (zero-filled)",
            "✗".red(),
            report.uncorrectable_blocks,
            report.blocks
        );
    }
    println!(
        "Recovered sequence ({} bits):\n{}",
        report.data.len(),
        bit_string(&report.data)
    );
    println!("--- End of sequence ---");
}
