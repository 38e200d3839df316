use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::info;

use uv2csv::{extract_uv_trace, write_csv, RawFile};

/// Dump the UV chromatogram from a .raw file to .csv
#[derive(Debug, Parser)]
#[command(name = "uv2csv", version, about)]
struct Cli {
    /// The path to the .raw file
    raw_file_path: PathBuf,

    /// The path to write the output to, as a .csv
    output_path: PathBuf,
}

fn run(args: Cli) -> anyhow::Result<()> {
    let mut raw_file = RawFile::open(&args.raw_file_path)
        .with_context(|| format!("opening {}", args.raw_file_path.display()))?;
    let trace = extract_uv_trace(&mut raw_file)
        .with_context(|| format!("extracting the UV trace of {}", args.raw_file_path.display()))?;
    info!(
        "extracted {} samples from {}",
        trace.len(),
        args.raw_file_path.display()
    );
    write_csv(&args.output_path, &trace)
        .with_context(|| format!("writing {}", args.output_path.display()))?;
    info!("wrote {}", args.output_path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
