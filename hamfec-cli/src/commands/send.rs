use anyhow::{Context, Result};
use hamfec_core::{
    batch::encode_message_wire,
    constants::{MAX_DATAGRAM_SIZE, STOP_SENTINEL},
    wire,
};
use std::io::{self, BufRead};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use tracing::{info, warn};

/// Line that ends the session
pub const STOP_COMMAND: &str = "stop";

pub fn execute(host: &str, port: u16) -> Result<()> {
    let target = (host, port)
        .to_socket_addrs()
        .with_context(|| format!("Failed to resolve {}:{}", host, port))?
        .next()
        .with_context(|| format!("No address found for {}:{}", host, port))?;

    let bind_addr: SocketAddr = if target.is_ipv4() {
        ([0u8; 4], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(bind_addr).context("Failed to bind local UDP socket")?;

    info!("Sending to {}; type bit strings, or '{}' to finish", target, STOP_COMMAND);

    let stdin = io::stdin();
    let sent = transmit_lines(&socket, target, stdin.lock())?;

    info!("Session finished after {} messages", sent);
    Ok(())
}

/// Send every input line as one batch of seven datagrams
///
/// Stops at a `stop` line or at end of input, sending the stop sentinel
/// either way. Lines that are not whole 4-bit blocks of `0`/`1` are skipped.
/// Returns the number of messages sent.
pub fn transmit_lines<R: BufRead>(socket: &UdpSocket, target: SocketAddr, input: R) -> Result<usize> {
    let mut sent = 0usize;

    for line in input.lines() {
        let line = line.context("Failed to read input line")?;
        let text = line.trim();

        if text == STOP_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }

        let payloads = match wire::parse_bits(text).and_then(|bits| encode_message_wire(&bits)) {
            Ok(payloads) => payloads,
            Err(e) => {
                warn!("Skipping line {:?}: {}", text, e);
                continue;
            }
        };

        if payloads[0].len() > MAX_DATAGRAM_SIZE {
            warn!(
                "Skipping line of {} blocks: a channel may carry at most {}",
                payloads[0].len(),
                MAX_DATAGRAM_SIZE
            );
            continue;
        }

        for payload in &payloads {
            socket
                .send_to(payload, target)
                .with_context(|| format!("Failed to send datagram to {}", target))?;
        }

        sent += 1;
        info!(
            "Sent message {} ({} bits in {} channels of {} bits)",
            sent,
            text.len(),
            payloads.len(),
            payloads[0].len()
        );
    }

    socket
        .send_to(STOP_SENTINEL, target)
        .with_context(|| format!("Failed to send stop sentinel to {}", target))?;

    Ok(sent)
}
