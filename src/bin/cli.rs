use clap::{Args, Parser, Subcommand};
use log::debug;
use std::error::Error;
use std::io::{self, Write};

use btc_wire::wire::constants::{MAIN_NET_MAGIC, MAX_HEADERS_PER_MESSAGE, PROTOCOL_VERSION};
use btc_wire::wire::{self, BlockHash, Decode, GetHeadersMessage, NetworkMessage};

/// Offline encoder/decoder for `getheaders` payloads.
///
/// Hashes are read and printed in display (reversed) hex, the form block
/// explorers use.
#[derive(Parser)]
#[command(name = "btc-wire")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the payload hex of a getheaders request
    Encode(RequestArgs),
    /// Parse a getheaders payload given as hex
    Decode {
        payload: String,
    },
    /// Print a full mainnet-style frame (header + payload) as hex
    Frame {
        #[command(flatten)]
        request: RequestArgs,

        /// Network magic in hex; mainnet when omitted
        #[arg(long, value_parser = parse_magic)]
        magic: Option<u32>,
    },
}

#[derive(Args)]
struct RequestArgs {
    #[arg(long, default_value_t = PROTOCOL_VERSION)]
    protocol_version: u32,

    /// Stop hash; omitted means all-zero (no stop)
    #[arg(long)]
    stop: Option<String>,

    /// Locator hashes, newest first
    hashes: Vec<String>,
}

impl RequestArgs {
    fn build(&self) -> Result<GetHeadersMessage, Box<dyn Error>> {
        let locator = self
            .hashes
            .iter()
            .map(|h| BlockHash::from_display_hex(h))
            .collect::<Result<Vec<_>, _>>()?;

        let stop = match &self.stop {
            Some(h) => BlockHash::from_display_hex(h)?,
            None => BlockHash::ZERO,
        };

        let msg = GetHeadersMessage::with_stop(self.protocol_version, locator, stop);
        msg.validate()?;

        debug!("built {msg}");
        Ok(msg)
    }
}

fn parse_magic(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid magic {s:?}: {e}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(request) => {
            let msg = request.build()?;
            println!("{}", hex::encode(msg.payload()));
        }
        Commands::Decode { payload } => decode(&payload)?,
        Commands::Frame { request, magic } => {
            let msg = request.build()?;

            let mut frame = Vec::new();
            wire::write_frame(
                &mut frame,
                magic.unwrap_or(MAIN_NET_MAGIC),
                msg.command(),
                &msg.payload(),
            )?;

            println!("{}", hex::encode(frame));
        }
    }

    Ok(())
}

fn decode(payload_hex: &str) -> Result<(), Box<dyn Error>> {
    let payload = hex::decode(payload_hex.trim())?;
    let msg = GetHeadersMessage::decode(&payload)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{msg}")?;
    writeln!(out, "version:    {}", msg.version)?;
    writeln!(out, "hash_count: {}", msg.locator_hashes.len())?;
    for (i, hash) in msg.locator_hashes.iter().enumerate() {
        writeln!(out, "  [{i}] {hash}")?;
    }
    if msg.hash_stop.is_zero() {
        writeln!(out, "hash_stop:  none (up to {MAX_HEADERS_PER_MESSAGE} headers)")?;
    } else {
        writeln!(out, "hash_stop:  {}", msg.hash_stop)?;
    }

    Ok(())
}
