use std::{
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chunkwise_layout::{ChunkLayout, ContainerSizes};
use clap::Args;
use tracing::{debug, info};

/// Where to find a container report and the two files it has to agree with.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Structural report of the container, as printed by `zck_read_header -c`.
    ///
    /// Pass `-` to read the report from stdin.
    #[clap(short, long)]
    pub report: PathBuf,

    /// The compressed container the report describes.
    #[clap(short, long)]
    pub compressed: PathBuf,

    /// The original file the container was produced from.
    #[clap(short, long)]
    pub original: PathBuf,
}

impl ReportArgs {
    pub fn sizes(&self) -> anyhow::Result<ContainerSizes> {
        let sizes = ContainerSizes::new(file_size(&self.compressed)?, file_size(&self.original)?);
        debug!(?sizes, "Container sizes");
        Ok(sizes)
    }

    pub fn read_report(&self) -> anyhow::Result<String> {
        if self.report == Path::new("-") {
            debug!("Reading report from stdin");
            io::read_to_string(io::stdin()).context("cannot read report from stdin")
        } else {
            fs::read_to_string(&self.report)
                .with_context(|| format!("cannot read report from {:?}", self.report))
        }
    }

    pub fn load_layout(&self) -> anyhow::Result<ChunkLayout> {
        let sizes = self.sizes()?;
        let report = self.read_report()?;
        info!(report = ?self.report, "Parsing container report");
        let layout = chunkwise_report::parse_report(&report, sizes)
            .with_context(|| format!("invalid container report {:?}", self.report))?;
        info!("Report describes {} chunks", layout.len());
        Ok(layout)
    }
}

pub fn file_size(path: &Path) -> anyhow::Result<u64> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot query the size of {path:?}"))?;
    Ok(metadata.len())
}

/// Reads up to `len` bytes from the start of the file at `path`.
pub fn read_prefix(path: &Path, len: u64) -> anyhow::Result<Vec<u8>> {
    let mut prefix = vec![];
    File::open(path)
        .with_context(|| format!("cannot open {path:?}"))?
        .take(len)
        .read_to_end(&mut prefix)
        .with_context(|| format!("cannot read the start of {path:?}"))?;
    Ok(prefix)
}
