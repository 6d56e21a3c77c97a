//! Example demonstrating custom strategy registration.
//!
//! A `.sources` manifest lists one source per line; each line is resolved
//! with the remaining strategies.
//!
//! Run with: cargo run --example custom_strategy

use std::io::{Read, Write};
use std::ops::ControlFlow;
use std::sync::Arc;

use sourcewalk::{AcquireBuilder, AcquireError, Context, Strategy, StrategyKind, Visit};

const MANIFEST: StrategyKind = StrategyKind::Custom("manifest");

#[derive(Debug)]
struct ManifestStrategy;

impl Strategy for ManifestStrategy {
    fn kind(&self) -> StrategyKind {
        MANIFEST
    }

    fn open(
        &self,
        ctx: &Context<'_>,
        source: &str,
        visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        if !source.ends_with(".sources") {
            return Err(AcquireError::unsupported(MANIFEST, source, "not a .sources manifest"));
        }

        let mut listing = String::new();
        ctx.open_source(source)?
            .read_to_string(&mut listing)
            .map_err(|e| AcquireError::Io {
                target: source.to_string(),
                source: e,
            })?;

        let rest = ctx.registry().without(&[MANIFEST]);
        let nested = ctx.with_registry(&rest);
        for line in listing.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if nested.dispatch(line, visit)?.was_stopped() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("sourcewalk-custom-strategy");
    std::fs::create_dir_all(&dir)?;

    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    std::fs::write(&a, "alpha")?;
    std::fs::write(&b, "beta")?;

    let manifest = dir.join("inputs.sources");
    let mut file = std::fs::File::create(&manifest)?;
    writeln!(file, "{}", a.display())?;
    writeln!(file, "{}", b.display())?;
    drop(file);

    let acquirer = AcquireBuilder::default()
        .with_strategy(Arc::new(ManifestStrategy))
        .add_source(manifest.to_string_lossy())
        .build()?;

    for file in acquirer.read_all()? {
        println!("{} ({}): {:?}", file.origin, file.strategy, file.text());
    }

    Ok(())
}
