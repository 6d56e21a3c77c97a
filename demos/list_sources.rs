//! Example listing every file reachable from the given sources.
//!
//! Run with: cargo run --example list_sources -- <path-or-url> [pattern]

use std::io::Read;
use std::ops::ControlFlow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| ".".to_string());
    let pattern = args.next().unwrap_or_default();

    let outcome = sourcewalk::resolve(&source, &pattern, true, |mut handle| {
        let mut bytes = Vec::new();
        handle.read_to_end(&mut bytes)?;
        println!("{:<10} {:>8}  {}", handle.strategy(), bytes.len(), handle.origin());
        Ok(ControlFlow::Continue(()))
    })?;

    match outcome.strategy() {
        Some(kind) => println!("resolved with {kind}: {} file(s)", outcome.handles()),
        None => println!("no strategy could open {source}"),
    }

    Ok(())
}
