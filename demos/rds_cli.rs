// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! RDS encoder demo CLI.
//!
//! Drives an [`RdsEncoder`] directly through its control surface and prints
//! a configurable number of groups as hex block tuples. This is a demo of
//! the library's control/pull surface, not the ASCII command protocol
//! described in `spec.md` §6.2 — that protocol's parser is an external
//! collaborator out of scope for this crate.
//!
//! # Usage
//!
//! ```bash
//! rds-cli --pi F00F --ps "MY RADIO" --rt "Now playing: idiomatic Rust" --count 20
//! ```

use clap::Parser;
use rds_encoder::{InitParams, RdsEncoder};

/// Emit a run of RDS groups with the given broadcaster configuration.
#[derive(Parser, Debug)]
#[command(name = "rds-cli")]
#[command(about = "RDS group encoder demo")]
#[command(version)]
struct Args {
    /// Program Identification, as 4 hex digits.
    #[arg(long, default_value = "F00F")]
    pi: String,

    /// Program Service name (up to 8 characters).
    #[arg(long, default_value = "RDS-RS")]
    ps: String,

    /// Radio Text (up to 64 characters).
    #[arg(long, default_value = "")]
    rt: String,

    /// Program Type (0-31).
    #[arg(long, default_value_t = 0)]
    pty: u8,

    /// Number of groups to print.
    #[arg(short, long, default_value_t = 10)]
    count: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let pi = u16::from_str_radix(&args.pi, 16).unwrap_or_else(|err| {
        eprintln!("invalid --pi {:?}: {err}", args.pi);
        std::process::exit(1);
    });

    let mut encoder = RdsEncoder::new(InitParams {
        pi,
        ps: &args.ps,
        rt: &args.rt,
        pty: args.pty,
        ptyn: "",
        tp: false,
        af: &[],
        call_sign: None,
        ert: "",
    });
    encoder.set_ct(false); // keep the demo output deterministic

    let mut bits = [0u8; 104];
    for i in 0..args.count {
        encoder.next_bits(&mut bits);
        let blocks = bits_to_blocks(&bits);
        println!(
            "group {i:>4}: {:04X} {:04X} {:04X} {:04X}",
            blocks[0], blocks[1], blocks[2], blocks[3]
        );
    }
}

fn bits_to_blocks(bits: &[u8; 104]) -> [u16; 4] {
    let mut blocks = [0u16; 4];
    for (b, chunk) in blocks.iter_mut().zip(bits.chunks_exact(26)) {
        let mut value: u16 = 0;
        for &bit in &chunk[..16] {
            value = (value << 1) | u16::from(bit);
        }
        *b = value;
    }
    blocks
}
