//! Subcommand implementations for the `lz4block` binary.
//!
//! Each command reads its whole input, runs the codec, and writes the result,
//! attaching file context to every I/O failure.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::bench::{bench_file, BenchConfig};
use crate::block::compress::{encode_fast, maximum_output_length};
use crate::block::decompress_api::decode_to_vec;
use crate::block::stream::Lz4DecoderStream;
use crate::block::types::LZ4_MAX_INPUT_SIZE;
use crate::cli::args::{BenchArgs, Cli, Command, CompressArgs, DecompressArgs};
use crate::cli::constants::{display_level, set_display_level};
use crate::config::{init_hc_attempts, init_nb_workers};
use crate::displaylevel;
use crate::hc::api::encode_hc_level;

/// Apply global flags and dispatch to the selected subcommand.
pub fn run(cli: Cli) -> Result<()> {
    set_display_level(cli.display_level());
    match cli.command {
        Command::Compress(args) => compress(&args),
        Command::Decompress(args) => decompress(&args),
        Command::Bench(args) => bench(&args),
    }
}

fn compress(args: &CompressArgs) -> Result<()> {
    let src = fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;
    if src.len() > LZ4_MAX_INPUT_SIZE {
        bail!(
            "{}: {} bytes exceeds the largest single block ({} bytes)",
            args.input.display(),
            src.len(),
            LZ4_MAX_INPUT_SIZE
        );
    }

    let mut dst = vec![0u8; maximum_output_length(src.len())];
    let n = if args.hc {
        let attempts = args.attempts.unwrap_or_else(init_hc_attempts);
        displaylevel!(3, "HC encoder, {} chain attempts\n", attempts);
        encode_hc_level(&src, &mut dst, attempts)
    } else {
        displaylevel!(3, "greedy encoder, acceleration {}\n", args.acceleration);
        encode_fast(&src, &mut dst, args.acceleration)
    };
    if n == 0 {
        bail!("{}: compression failed", args.input.display());
    }

    write_output(&args.output, &dst[..n])?;
    displaylevel!(
        2,
        "{} : {} -> {} bytes ({:.2}%)\n",
        args.input.display(),
        src.len(),
        n,
        n as f64 * 100.0 / src.len().max(1) as f64
    );
    Ok(())
}

fn decompress(args: &DecompressArgs) -> Result<()> {
    let written = match args.size {
        Some(size) => {
            let src = fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;
            let out = decode_to_vec(&src, size).with_context(|| format!("{}: cannot decode block", args.input.display()))?;
            write_output(&args.output, &out)?;
            out.len() as u64
        }
        None => {
            let file = File::open(&args.input).with_context(|| format!("cannot open {}", args.input.display()))?;
            let len = file.metadata().map(|m| m.len()).unwrap_or(u64::MAX);
            let mut decoder = Lz4DecoderStream::new(BufReader::new(file), len);
            let out_file =
                File::create(&args.output).with_context(|| format!("cannot create {}", args.output.display()))?;
            let mut writer = BufWriter::new(out_file);
            let n = io::copy(&mut decoder, &mut writer)
                .with_context(|| format!("{}: cannot decode block stream", args.input.display()))?;
            writer.flush().with_context(|| format!("cannot write {}", args.output.display()))?;
            n
        }
    };
    displaylevel!(2, "{} : decoded {} bytes\n", args.input.display(), written);
    Ok(())
}

fn bench(args: &BenchArgs) -> Result<()> {
    let mut config = BenchConfig::default();
    config
        .set_notification_level(display_level())
        .set_hc(args.hc)
        .set_hc_attempts(init_hc_attempts())
        .set_block_size(args.block_size)
        .set_nb_workers(args.workers.unwrap_or_else(init_nb_workers));
    bench_file(&args.input, &config).with_context(|| format!("benchmark of {} failed", args.input.display()))?;
    Ok(())
}

fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("cannot write {}", path.display()))
}
