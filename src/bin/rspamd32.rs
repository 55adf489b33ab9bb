//! Rspamd-compatible base32 command line interface.
//!
//! Usage:
//!   rspamd32 encode [-a ALPHABET] [FILE]            # encode FILE or stdin
//!   rspamd32 decode [-a ALPHABET] [--strict] [FILE] # decode FILE or stdin
//!   rspamd32 demo                                   # walk through the alphabets
//!
//! Set `RUST_LOG=debug` for diagnostics on stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::debug;
use rspamd_base32::{
    decode, decode_with, decode_zbase32, encode, encode_zbase32, Alphabet, EncodeOrder,
    Strictness, BECH32, RFC4648, ZBASE32,
};

#[derive(Parser)]
#[command(version, about = "Rspamd-compatible base32 encoder and decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file (or stdin) to base32 on stdout
    Encode {
        #[command(flatten)]
        alphabet: AlphabetArgs,

        /// Input file, `-` or missing for stdin
        input: Option<PathBuf>,
    },
    /// Decode base32 from a file (or stdin) to raw bytes on stdout
    Decode {
        #[command(flatten)]
        alphabet: AlphabetArgs,

        /// Reject trailing bits that do not form a byte
        #[arg(long)]
        strict: bool,

        /// Input file, `-` or missing for stdin
        input: Option<PathBuf>,
    },
    /// Show encodings of sample strings in every alphabet
    Demo,
}

#[derive(Args)]
struct AlphabetArgs {
    /// Predefined alphabet: zbase32, rfc4648 or bech32
    #[arg(
        short,
        long,
        default_value = "zbase32",
        value_parser = parse_predefined,
        conflicts_with = "custom"
    )]
    alphabet: Alphabet,

    /// Custom alphabet of 32 printable ASCII symbols
    #[arg(long)]
    custom: Option<String>,

    /// Bit order for --custom
    #[arg(long, value_enum, default_value_t = Order::Normal)]
    order: Order,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Normal,
    Inverse,
}

impl From<Order> for EncodeOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Normal => Self::Normal,
            Order::Inverse => Self::Inverse,
        }
    }
}

impl AlphabetArgs {
    fn resolve(&self) -> Result<Alphabet> {
        match &self.custom {
            Some(spec) => Alphabet::new(spec, self.order.into())
                .with_context(|| format!("invalid custom alphabet {spec:?}")),
            None => Ok(self.alphabet),
        }
    }
}

fn parse_predefined(name: &str) -> Result<Alphabet, String> {
    Alphabet::predefined(name)
        .copied()
        .ok_or_else(|| format!("unknown alphabet {name:?} (expected zbase32, rfc4648 or bech32)"))
}

/// Read a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let buffer = match path {
        Some(path) if path != Path::new("-") => fs::read(path)
            .with_context(|| format!("cannot read input file {}", path.display()))?,
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    debug!("read {} input bytes", buffer.len());
    Ok(buffer)
}

fn trim_ascii_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let end = data
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &data[start..end]
}

fn do_encode(alphabet: &Alphabet, input: Option<&Path>) -> Result<()> {
    let data = read_input(input)?;
    let encoded = encode(&data, alphabet);
    debug!("encoded {} bytes into {} symbols", data.len(), encoded.len());

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{encoded}").context("failed to write output")?;
    Ok(())
}

fn do_decode(alphabet: &Alphabet, strict: bool, input: Option<&Path>) -> Result<()> {
    let data = read_input(input)?;
    let strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let decoded = decode_with(trim_ascii_whitespace(&data), alphabet, strictness)
        .context("decoding failed")?;
    debug!("decoded {} bytes", decoded.len());

    let mut stdout = io::stdout().lock();
    stdout.write_all(&decoded).context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}

/// Print one round trip in the demo layout.
fn show_round_trip(example: &str, alphabet: &Alphabet) -> Result<()> {
    let encoded = encode(example, alphabet);
    let decoded = decode(&encoded, alphabet)
        .with_context(|| format!("error decoding {encoded:?}"))?;
    let decoded = String::from_utf8_lossy(&decoded);

    println!("Input:   {example:?}");
    println!("Encoded: {encoded:?}");
    println!("Decoded: {decoded:?}");
    println!("Match:   {}\n", example == decoded);
    Ok(())
}

fn do_demo() -> Result<()> {
    const EXAMPLES: [&str; 5] = ["hello", "world", "test123", "", "The quick brown fox"];

    println!("Rspamd-compatible Base32 Demo");
    println!("=============================\n");

    println!("1. ZBASE32 (Rspamd compatible, default):");
    println!("-----------------------------------------");
    for example in EXAMPLES {
        let encoded = encode_zbase32(example);
        let decoded = decode_zbase32(&encoded)
            .with_context(|| format!("error decoding {encoded:?}"))?;
        let decoded = String::from_utf8_lossy(&decoded);
        println!("Input:   {example:?}");
        println!("Encoded: {encoded:?}");
        println!("Decoded: {decoded:?}");
        println!("Match:   {}\n", example == decoded);
    }

    println!("2. RFC 4648 Standard Base32:");
    println!("-----------------------------");
    for example in EXAMPLES {
        show_round_trip(example, &RFC4648)?;
    }

    println!("3. BECH32 Encoding:");
    println!("-------------------");
    for example in EXAMPLES {
        show_round_trip(example, &BECH32)?;
    }

    println!("4. Custom Alphabet Example:");
    println!("----------------------------");
    let custom = Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUV", EncodeOrder::Normal)
        .context("error creating custom alphabet")?;
    show_round_trip("custom example", &custom)?;

    println!("5. Rspamd Reversed Octets Order:");
    println!("--------------------------------");
    let normal_zbase = ZBASE32.with_order(EncodeOrder::Normal);
    for example in ["test", "hello", "data"] {
        let inverse = encode_zbase32(example);
        let normal = encode(example, &normal_zbase);
        println!("Input:        {example:?}");
        println!("ZBASE32:      {inverse:?} (Rspamd compatible, reversed octets)");
        println!("Normal order: {normal:?} (same alphabet, MSB-first)");
        println!("RFC 4648:     {:?}", encode(example, &RFC4648));
        println!("Different:    {}\n", inverse != normal);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode { alphabet, input } => do_encode(&alphabet.resolve()?, input.as_deref()),
        Commands::Decode {
            alphabet,
            strict,
            input,
        } => do_decode(&alphabet.resolve()?, strict, input.as_deref()),
        Commands::Demo => do_demo(),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
