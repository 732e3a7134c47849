use std::{fs, path::PathBuf};

use anyhow::Context;
use chunkwise_layout::{select_witness, verify_slice};
use clap::Parser;
use tracing::info;

use crate::input::ReportArgs;

#[derive(Debug, Parser)]
pub struct VerifyArgs {
    #[clap(flatten)]
    input: ReportArgs,

    /// Data of the witness chunk, as extracted from the container by a chunk-aware reader.
    ///
    /// The witness is the first chunk that does not start at the beginning of the original file.
    #[clap(short, long)]
    produced: PathBuf,
}

pub fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let layout = args.input.load_layout()?;
    let witness = select_witness(&layout).context("cannot select a witness chunk")?;
    info!("Witness chunk: {witness}");

    let original = fs::read(&args.input.original)
        .with_context(|| format!("cannot read original file {:?}", args.input.original))?;
    let produced = fs::read(&args.produced)
        .with_context(|| format!("cannot read witness data {:?}", args.produced))?;

    verify_slice(witness, layout.sizes().original, &original, &produced)
        .context("witness chunk does not match the original file")?;

    println!(
        "witness chunk matches original bytes {}..{}",
        witness.original_start,
        witness.original_end()
    );
    Ok(())
}
