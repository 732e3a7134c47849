use std::path::PathBuf;

use anyhow::Context;
use chunkwise_layout::{
    container::{check_magic, check_shrunk, ZCK_MAGIC},
    ContainerSizes,
};
use clap::Parser;
use tracing::debug;

use crate::input::{file_size, read_prefix};

#[derive(Debug, Parser)]
pub struct PreflightArgs {
    /// The compressed container.
    #[clap(short, long)]
    compressed: PathBuf,

    /// The original file the container was produced from.
    #[clap(short, long)]
    original: PathBuf,
}

pub fn preflight(args: PreflightArgs) -> anyhow::Result<()> {
    let sizes = ContainerSizes::new(file_size(&args.compressed)?, file_size(&args.original)?);
    debug!(?sizes, "Container sizes");
    check_shrunk(sizes).context("compression did not shrink the original file")?;

    let prefix = read_prefix(&args.compressed, ZCK_MAGIC.len() as u64)?;
    debug!("{:?} starts with {prefix:02x?}", args.compressed);
    check_magic(&prefix).with_context(|| format!("{:?} is not a zchunk file", args.compressed))?;

    println!(
        "{:?} is a zchunk file of {} bytes ({} bytes original)",
        args.compressed, sizes.compressed, sizes.original
    );
    Ok(())
}
