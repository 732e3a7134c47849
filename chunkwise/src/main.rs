mod input;
mod layout;
mod preflight;
mod verify;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use input::ReportArgs;
use layout::LayoutArgs;
use preflight::PreflightArgs;
use tracing::{error, info, metadata::LevelFilter};
use tracing_subscriber::{prelude::*, EnvFilter};
use verify::VerifyArgs;

#[derive(Subcommand)]
enum Command {
    /// Check that a compressed file looks like a zchunk container at all.
    ///
    /// The file has to start with the zchunk magic and be smaller than the original.
    Preflight(PreflightArgs),

    /// Parse a container report and print the chunk layout it describes.
    ///
    /// The layout is checked against the actual sizes of the compressed and original files:
    /// chunks have to follow each other without gaps and end exactly at the end of both files.
    Layout(LayoutArgs),

    /// Print the chunk that `verify` compares against the original file.
    Witness(ReportArgs),

    /// Compare the data of the witness chunk with the matching range of the original file.
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Tool to run.
    #[clap(subcommand)]
    command: Command,
}

fn fallible_main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Preflight(args) => preflight::preflight(args)?,
        Command::Layout(args) => layout::layout(args)?,
        Command::Witness(args) => layout::witness(args)?,
        Command::Verify(args) => verify::verify(args)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        );
    tracing::subscriber::set_global_default(subscriber)
        .expect("cannot set default tracing subscriber");

    info!("chunkwise version {}", env!("CARGO_PKG_VERSION"));

    match fallible_main() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
