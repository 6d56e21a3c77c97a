//! Internal test modules.


#[cfg(feature = "sarge")]
mod cli;
mod config;
mod engine;
mod io;
mod strategy;
