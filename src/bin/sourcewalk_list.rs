use std::error::Error;
use std::io::{self, Write};
use std::ops::ControlFlow;

use sarge::prelude::*;
use sourcewalk::cli::{SourceArgs, StrategyArgs};
use sourcewalk::{AcquireBuilder, AcquireConfig, ErrorPolicy, default_registry};
use tracing::Level;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  sourcewalk_list --source <path|url>[,...] [--pattern <regex>] [--strategy <name>[,...]]");
    eprintln!("  sourcewalk_list --config <file.yaml|file.json|file.toml>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --source      Source path or URL (repeatable, comma-separated)");
    eprintln!("  -p, --pattern     Regular expression matched against whole base names");
    eprintln!("      --strategy    Strategies to try, in order (dir, zip, tar, gzip, bzip2, text)");
    eprintln!("  -c, --config      Load sources and settings from a config file");
    eprintln!("      --fast-fail   Stop at the first failing source");
    eprintln!("  -v, --verbose     Log strategy decisions");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let source_ref = reader.add::<SourceArgs>(tag::both('s', "source"));
    let pattern_ref = reader.add::<String>(tag::both('p', "pattern"));
    let strategy_ref = reader.add::<StrategyArgs>(tag::long("strategy"));
    let config_ref = reader.add::<String>(tag::both('c', "config"));
    let fast_fail_ref = reader.add::<bool>(tag::long("fast-fail"));
    let verbose_ref = reader.add::<bool>(tag::both('v', "verbose"));

    let args = reader.parse()?;

    let verbose = matches!(verbose_ref.get(&args), Some(Ok(true)));
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let mut builder = match config_ref.get(&args) {
        Some(Ok(path)) => {
            let config = AcquireConfig::from_path(&path)?;
            AcquireBuilder::from_config(config, default_registry())?
        }
        Some(Err(e)) => return Err(e.into()),
        None => AcquireBuilder::default(),
    };

    let sources = match source_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => unreachable!("SourceArgs parsing is infallible"),
        None => SourceArgs::default(),
    };
    builder = builder.with_source_args(&sources);

    if let Some(Ok(pattern)) = pattern_ref.get(&args) {
        builder = builder.with_pattern(pattern);
    }

    match strategy_ref.get(&args) {
        Some(Ok(order)) if !order.is_empty() => builder = builder.with_order(order.as_slice()),
        Some(Err(e)) => return Err(e.into()),
        _ => {}
    }

    if matches!(fast_fail_ref.get(&args), Some(Ok(true))) {
        builder = builder.with_mode(ErrorPolicy::FastFail);
    }
    if verbose {
        builder = builder.with_verbose(true);
    }

    let acquirer = builder.build()?;
    if acquirer.sources().is_empty() {
        return Err("missing --source or --config".into());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcomes = acquirer.for_each(|mut handle| {
        let bytes = io::copy(&mut handle, &mut io::sink())?;
        writeln!(out, "{}\t{}\t{}", handle.origin(), handle.strategy(), bytes)?;
        Ok(ControlFlow::Continue(()))
    })?;

    for (source, outcome) in outcomes {
        if !outcome.is_matched() {
            tracing::warn!(source, "no strategy could open the source");
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("sourcewalk_list error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
