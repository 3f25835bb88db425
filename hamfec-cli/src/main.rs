use anyhow::Result;
use clap::{Parser, Subcommand};
use hamfec_cli::{commands, LossMode};
use hamfec_core::constants::DEFAULT_PORT;
use hamfec_core::simulation::SweepConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hamfec")]
#[command(about = "hamfec - Hamming(7,4) coding with channel interleaving over lossy links", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a bit string and show codewords and channel payloads
    Encode {
        /// Bits to encode, e.g. 01011100 (length a multiple of 4)
        #[arg(short, long)]
        bits: String,
    },

    /// Decode one 7-bit word; mark erased positions with '?' or '_'
    Decode {
        /// Received word, e.g. 0110101 or 0?0?101
        #[arg(short, long)]
        word: String,
    },

    /// Run the bit-flip and packet-loss walkthrough
    Demo {
        /// Seed for the loss model
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read bit strings from stdin and send them as interleaved datagrams
    Send {
        /// Receiver host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Receiver UDP port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Receive interleaved datagrams, simulate loss and recover the data
    Receive {
        /// UDP port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Loss model applied to each batch of seven channels
        #[arg(long, value_enum, default_value_t = LossMode::Fixed)]
        loss: LossMode,

        /// Per-channel loss probability for the probabilistic model
        #[arg(long, default_value = "0.1")]
        probability: f64,

        /// Seed for the loss model
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file for batch reports
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Sweep the channel loss probability and report the recovery rate
    Simulate {
        /// Message length in bits (multiple of 4)
        #[arg(long, default_value = "4000")]
        length: usize,

        /// Trials averaged per probability
        #[arg(long, default_value = "10")]
        trials: usize,

        /// Number of probabilities between 0 and 1 inclusive
        #[arg(long, default_value = "21")]
        steps: usize,

        /// Seed for message generation and loss
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file for the sweep
        #[arg(short, long)]
        output: Option<String>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Encode { bits } => commands::encode::execute(&bits),

        Commands::Decode { word } => commands::decode::execute(&word),

        Commands::Demo { seed } => commands::demo::execute(seed),

        Commands::Send { host, port } => commands::send::execute(&host, port),

        Commands::Receive {
            port,
            loss,
            probability,
            seed,
            output,
        } => commands::receive::execute(port, loss.model(probability), seed, output.as_deref()),

        Commands::Simulate {
            length,
            trials,
            steps,
            seed,
            output,
            progress,
        } => commands::simulate::execute(
            SweepConfig {
                sequence_len: length,
                trials,
                steps,
            },
            seed,
            output.as_deref(),
            progress,
        ),
    }
}
