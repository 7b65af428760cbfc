use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use standings_converter::registry;

/// Converts contest standings between judge formats.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input format name.
    parser: String,
    /// Output format name.
    renderer: String,
    /// Source file (or, for codeforces, a properties file with contestId
    /// and optional key/secret).
    input: PathBuf,
    /// Destination file, written only on success.
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let parser = match registry::parser(&cli.parser) {
        Some(parser) => parser,
        None => bail!(
            "unknown parser format {:?}, expected one of: {}",
            cli.parser,
            registry::PARSER_NAMES.join(", ")
        ),
    };
    let renderer = match registry::renderer(&cli.renderer) {
        Some(renderer) => renderer,
        None => bail!(
            "unknown renderer format {:?}, expected one of: {}",
            cli.renderer,
            registry::RENDERER_NAMES.join(", ")
        ),
    };

    let started = Instant::now();
    let contest = parser
        .parse(&cli.input)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    let mut buffer = Vec::new();
    renderer.render(&contest, &mut buffer)?;
    fs::write(&cli.output, buffer)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("converted in {} ms", started.elapsed().as_millis());
    Ok(())
}
