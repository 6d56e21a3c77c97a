use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::{SourceArgs, StrategyArgs, parse_strategy};
use crate::error::AcquireError;

fn tokens(val: &str) -> impl Iterator<Item = &str> {
    val.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl ArgumentType for SourceArgs {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        let sources = val
            .map(|v| tokens(v).map(str::to_string).collect())
            .unwrap_or_default();
        Some(Ok(SourceArgs(sources)))
    }

    fn default_value() -> Option<Self> {
        Some(SourceArgs::default())
    }
}

impl ArgumentType for StrategyArgs {
    type Error = AcquireError;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        let Some(v) = val else {
            return Some(Ok(StrategyArgs::default()));
        };
        let kinds: Result<Vec<_>, _> = tokens(v).map(parse_strategy).collect();
        Some(kinds.map(StrategyArgs))
    }

    fn default_value() -> Option<Self> {
        Some(StrategyArgs::default())
    }
}
