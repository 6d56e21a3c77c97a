use std::ops::ControlFlow;
use std::sync::Arc;

use crate::dispatch::{Context, Visit};
use crate::error::AcquireError;
use crate::strategy::{
    DirectoryStrategy, PlaintextStrategy, Strategy, StrategyKind, StrategyRegistry,
    default_registry,
};

#[derive(Debug)]
struct Named(&'static str);

impl Strategy for Named {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Custom(self.0)
    }

    fn open(
        &self,
        _ctx: &Context<'_>,
        source: &str,
        _visit: &mut Visit<'_>,
    ) -> Result<ControlFlow<()>, AcquireError> {
        Err(AcquireError::unsupported(self.kind(), source, "never applies"))
    }
}

#[test]
fn default_registry_order_ends_with_plaintext() {
    let kinds = default_registry().kinds();
    assert_eq!(kinds.first(), Some(&StrategyKind::Directory));
    assert_eq!(kinds.last(), Some(&StrategyKind::Plaintext));

    #[cfg(all(feature = "zip", feature = "tar", feature = "gzip", feature = "bzip2"))]
    assert_eq!(
        kinds,
        vec![
            StrategyKind::Directory,
            StrategyKind::Zip,
            StrategyKind::Tar,
            StrategyKind::Gzip,
            StrategyKind::Bzip2,
            StrategyKind::Plaintext,
        ]
    );
}

#[test]
fn custom_strategies_are_inserted_before_plaintext() {
    let mut registry = default_registry();
    registry.register(Arc::new(Named("first")));
    registry.register(Arc::new(Named("second")));

    let kinds = registry.kinds();
    let n = kinds.len();
    assert_eq!(kinds[n - 3], StrategyKind::Custom("first"));
    assert_eq!(kinds[n - 2], StrategyKind::Custom("second"));
    assert_eq!(kinds[n - 1], StrategyKind::Plaintext);
}

#[test]
fn registering_a_kind_twice_keeps_the_first() {
    let mut registry = StrategyRegistry::new();
    registry.register(Arc::new(DirectoryStrategy));
    registry.register(Arc::new(DirectoryStrategy));
    assert_eq!(registry.len(), 1);
}

#[test]
fn without_leaves_the_original_untouched() {
    let registry = default_registry();
    let reduced = registry.without(&[StrategyKind::Directory]);

    assert!(registry.has_strategy(&StrategyKind::Directory));
    assert!(!reduced.has_strategy(&StrategyKind::Directory));
    assert_eq!(reduced.len(), registry.len() - 1);
}

#[test]
fn select_keeps_requested_order_and_moves_plaintext_last() {
    let registry = default_registry().with_strategy(Arc::new(Named("custom")));
    let selected = registry.select(&[
        StrategyKind::Plaintext,
        StrategyKind::Custom("custom"),
        StrategyKind::Directory,
        StrategyKind::Custom("missing"),
    ]);

    assert_eq!(
        selected.kinds(),
        vec![
            StrategyKind::Custom("custom"),
            StrategyKind::Directory,
            StrategyKind::Plaintext,
        ]
    );
}

#[test]
fn empty_registry_has_no_strategies() {
    let registry = StrategyRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.get(&StrategyKind::Plaintext).is_none());

    let registry = registry.with_strategy(Arc::new(PlaintextStrategy));
    assert!(registry.get(&StrategyKind::Plaintext).is_some());
}

#[test]
fn strategy_kind_parses_names_and_aliases() {
    assert_eq!("dir".parse::<StrategyKind>().unwrap(), StrategyKind::Directory);
    assert_eq!("ZIP".parse::<StrategyKind>().unwrap(), StrategyKind::Zip);
    assert_eq!("gz".parse::<StrategyKind>().unwrap(), StrategyKind::Gzip);
    assert_eq!("bz2".parse::<StrategyKind>().unwrap(), StrategyKind::Bzip2);
    assert_eq!("txt".parse::<StrategyKind>().unwrap(), StrategyKind::Plaintext);

    match "rar".parse::<StrategyKind>() {
        Err(AcquireError::UnknownStrategy(name)) => assert_eq!(name, "rar"),
        other => panic!("expected UnknownStrategy, got: {other:?}"),
    }
}

#[test]
fn strategy_kind_display_round_trips_through_from_str() {
    for kind in default_registry().kinds() {
        assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        assert!(kind.is_available());
    }
}
