use anyhow::Context;
use chunkwise_layout::select_witness;
use chunkwise_report::render_report;
use clap::Parser;
use tracing::debug;

use crate::input::ReportArgs;

#[derive(Debug, Parser)]
pub struct LayoutArgs {
    #[clap(flatten)]
    input: ReportArgs,

    /// Print the layout back out in report form instead of as a table.
    ///
    /// The output can be parsed again with the same compressed and original files.
    #[clap(long)]
    render: bool,
}

pub fn layout(args: LayoutArgs) -> anyhow::Result<()> {
    let layout = args.input.load_layout()?;

    if args.render {
        debug!("Rendering layout in report form");
        print!(
            "{}",
            render_report(&layout).context("cannot render layout")?
        );
        return Ok(());
    }

    let params = layout.params();
    println!("header overhead: {} bytes", params.size_diff);
    println!("data size:       {} bytes", params.data_size);
    println!("chunks:          {}", params.chunk_count);
    for (i, chunk) in layout.iter().enumerate() {
        println!("{i:6} {chunk}");
    }

    Ok(())
}

pub fn witness(args: ReportArgs) -> anyhow::Result<()> {
    let layout = args.load_layout()?;
    let witness = select_witness(&layout).context("cannot select a witness chunk")?;
    println!("{witness}");
    Ok(())
}
