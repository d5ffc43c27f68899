use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use revgraph_core::repository::Repository;
use revgraph_core::surfaces::{default_registry, RenderService};
use revgraph_core::{AnchorTable, RenderConfig, Row};

/// Render a revision history graph as SVG or PNG.
#[derive(Debug, Parser)]
#[command(name = "revgraph", version, about)]
struct Cli {
    /// JSON file holding an array of rows; stdin when neither this nor --repo is given.
    #[arg(long, value_name = "FILE", conflicts_with = "repo")]
    rows: Option<Utf8PathBuf>,

    /// Git repository (or a path inside one) to graph.
    #[arg(long, value_name = "DIR")]
    repo: Option<Utf8PathBuf>,

    /// Maximum number of commits taken from --repo.
    #[arg(long, default_value_t = 200)]
    limit: usize,

    /// Surface backend id.
    #[arg(long, default_value = "svg")]
    backend: String,

    /// Output file; SVG goes to stdout when omitted.
    #[arg(long, short, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    /// JSON render configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Height of every row, overriding the configured default.
    #[arg(long, value_name = "PX")]
    row_height: Option<f64>,

    /// Write the per-row left padding map as JSON.
    #[arg(long, value_name = "FILE")]
    paddings: Option<Utf8PathBuf>,

    /// Print the available backends and exit.
    #[arg(long)]
    list_backends: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => RenderConfig::load(path).with_context(|| format!("failed to load {path}"))?,
        None => RenderConfig::default(),
    };
    let service = RenderService::new(default_registry(), config)?;

    if cli.list_backends {
        for summary in service.summaries() {
            println!(
                "{}\t{}\t{}",
                summary.id, summary.label, summary.capabilities.media_type
            );
        }
        return Ok(());
    }

    let Some(capabilities) = service.capabilities(&cli.backend) else {
        bail!("unknown backend '{}'", cli.backend);
    };
    if capabilities.raster && cli.output.is_none() {
        bail!("the {} backend writes binary output; pass --output", cli.backend);
    }

    let rows = load_rows(&cli)?;
    let height = cli.row_height.unwrap_or(service.config().row_height);
    let mut anchors = AnchorTable::for_rows(&rows, height);

    let rendered = service
        .render(&cli.backend, &rows, &mut anchors)
        .context("failed to render graph")?;
    log::info!(
        "rendered {} rows, {} columns, {}x{}",
        rows.len(),
        rendered.summary.columns,
        rendered.summary.size.width,
        rendered.summary.size.height
    );

    match &cli.output {
        Some(path) => write_file(path, &rendered.output.bytes)?,
        None => std::io::stdout()
            .write_all(&rendered.output.bytes)
            .context("failed to write to stdout")?,
    }

    if let Some(path) = &cli.paddings {
        let json = serde_json::to_vec_pretty(anchors.paddings())?;
        write_file(path, &json)?;
    }

    Ok(())
}

fn load_rows(cli: &Cli) -> Result<Vec<Row>> {
    if let Some(path) = &cli.repo {
        let repository = Repository::open(path).with_context(|| format!("failed to open {path}"))?;
        let history = repository.history(Some(cli.limit))?;
        return Ok(history.into_iter().map(|entry| entry.row).collect());
    }

    let json = match &cli.rows {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read rows from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&json).context("failed to parse rows")
}

fn write_file(path: &Utf8Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("failed to write {path}"))
}
