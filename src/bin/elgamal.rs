// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! elgamal: set up a key, encrypt a message block by block and decrypt it.

use std::io::{self, Read};

use clap::Parser;
use eyre::{Result, WrapErr, ensure};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use elgamal_blocks::{BlockCodec, Ciphertext, Decrypt, Encrypt, KeyPairBuilder, present};

#[derive(Parser)]
#[command(name = "elgamal")]
#[command(about = "Encrypt and decrypt a message with word-sized ElGamal")]
#[command(version)]
struct Args {
    /// Bit length of q; the modulus p = 2q + 1 is one bit wider
    #[arg(short, long, default_value_t = KeyPairBuilder::DEFAULT_BITS)]
    bits: u32,

    /// Random seed for deterministic key setup (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Pad character used to fill the last block
    #[arg(long, default_value_t = ' ')]
    pad: char,

    /// Log verbosely
    #[arg(short, long)]
    verbose: bool,

    /// Message to encrypt; read from stdin when omitted
    message: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let message = match args.message {
        Some(message) => message,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).wrap_err("failed to read message from stdin")?;
            buf.trim_end_matches('\n').to_owned()
        }
    };

    ensure!(args.pad.is_ascii(), "pad character must be ASCII, got {:?}", args.pad);

    let mut builder = KeyPairBuilder::new().bit_length(args.bits);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let keypair = builder.build().wrap_err("key setup failed")?;
    println!("{}\n", keypair.summary());

    let public = keypair.public_key();
    let codec = BlockCodec::for_modulus(public.p())?.with_pad_byte(args.pad as u8);
    info!(width = codec.width(), "packing {} bytes", message.len());

    let padded = codec.pad(message.as_bytes())?;
    let blocks = codec.bytes_to_blocks(&padded, padded.len() / codec.width())?;
    println!("Padded message: {:?}", String::from_utf8_lossy(&padded));
    println!("Blocks ({} bytes each): {blocks:?}", codec.width());

    let ciphertext = keypair.encrypt(&blocks)?;
    print_ciphertext(&ciphertext)?;

    let recovered = keypair.decrypt(&ciphertext)?;
    let bytes = codec.blocks_to_bytes(&recovered, recovered.len(), padded.len())?;
    println!("Decrypted message: {:?}", String::from_utf8_lossy(&bytes));

    Ok(())
}

fn print_ciphertext(ciphertext: &Ciphertext) -> Result<()> {
    match ciphertext.present() {
        Ok(encoded) => {
            println!("Ciphertext string: {}", String::from_utf8_lossy(&encoded));
            for pair in present::parse_presented(&encoded)? {
                println!("  {pair}");
            }
        }
        // moduli above 16 bits do not fit the printable form
        Err(_) => {
            for (masked, ephemeral) in ciphertext.pairs() {
                println!("  (mhat, a) = ({masked}, {ephemeral})");
            }
        }
    }
    Ok(())
}
