//! Throughput benchmarks for base32 encoding and decoding.
//!
//! Measures each predefined alphabet over synthetic payloads, for regression
//! testing during development. Use for relative comparisons only.
//!
//! Usage:
//!   cargo run --release --bin bench          # Run with default 1000 iterations
//!   cargo run --release --bin bench -- 5000  # Run with custom iteration count

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use std::env;
use std::hint::black_box;
use std::time::Instant;

use rspamd_base32::{
    decode_into, decoded_len, encode_into, encoded_len, Alphabet, BECH32, RFC4648, ZBASE32,
};

const DEFAULT_ITERATIONS: usize = 1000;

struct BenchConfig {
    name: &'static str,
    size: usize,
}

const PAYLOADS: &[BenchConfig] = &[
    BenchConfig {
        name: "small",
        size: 5,
    },
    BenchConfig {
        name: "medium",
        size: 64,
    },
    BenchConfig {
        name: "large",
        size: 1000,
    },
    BenchConfig {
        name: "very-large",
        size: 10_000,
    },
];

static ALPHABETS: [(&str, &Alphabet); 3] = [
    ("zbase32", &ZBASE32),
    ("rfc4648", &RFC4648),
    ("bech32", &BECH32),
];

/// Deterministic payload so runs are comparable.
fn payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i.wrapping_mul(31) ^ 0xA5) as u8).collect()
}

fn report(label: &str, bytes: usize, elapsed_secs: f64, iterations: usize) {
    let per_iter_us = elapsed_secs * 1_000_000.0 / iterations as f64;
    let throughput_mbps = (bytes as f64 * 8.0) / per_iter_us;

    println!("{label:<24} {per_iter_us:>10.3} µs/iter  {throughput_mbps:>9.1} Mbps  ({bytes} bytes)");
}

fn bench_encode(name: &str, alphabet: &Alphabet, config: &BenchConfig, iterations: usize) {
    let input = payload(config.size);
    let mut output = vec![0u8; encoded_len(input.len())];

    // Warmup run
    encode_into(&input, &mut output, alphabet);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(encode_into(black_box(&input), &mut output, alphabet));
    }
    let elapsed = start.elapsed().as_secs_f64();

    report(&format!("{name}/{}", config.name), input.len(), elapsed, iterations);
}

fn bench_decode(name: &str, alphabet: &Alphabet, config: &BenchConfig, iterations: usize) {
    let input = payload(config.size);
    let mut encoded = vec![0u8; encoded_len(input.len())];
    let written = encode_into(&input, &mut encoded, alphabet);
    encoded.truncate(written);

    let mut output = vec![0u8; decoded_len(encoded.len())];

    // Warmup run
    if let Err(e) = decode_into(&encoded, &mut output, alphabet) {
        println!("{:<24} SKIP (decoding failed: {e})", format!("{name}/{}", config.name));
        return;
    }

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(decode_into(black_box(&encoded), &mut output, alphabet));
    }
    let elapsed = start.elapsed().as_secs_f64();

    report(&format!("{name}/{}", config.name), input.len(), elapsed, iterations);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let iterations = if args.len() >= 2 {
        args[1].parse().unwrap_or(DEFAULT_ITERATIONS)
    } else {
        DEFAULT_ITERATIONS
    };

    println!("Base32 Benchmarks");
    println!("=================");
    println!("Iterations: {iterations}\n");

    println!("Encoding:");
    for (name, alphabet) in &ALPHABETS {
        for config in PAYLOADS {
            bench_encode(name, alphabet, config, iterations);
        }
    }

    println!("\nDecoding:");
    for (name, alphabet) in &ALPHABETS {
        for config in PAYLOADS {
            bench_decode(name, alphabet, config, iterations);
        }
    }

    println!("\nUse these results for relative comparisons only.");
}
