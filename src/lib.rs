//! Traceprof core library: build-profile trace analysis and report rendering.

mod aggregate;
mod analyze_cmd;
mod config;
mod dump;
mod error;
mod html;
mod loader;
mod phase;
mod printer;
mod profile;
mod task;
#[cfg(test)]
mod testutil;
mod timefmt;

pub use aggregate::*;
pub use analyze_cmd::*;
pub use config::*;
pub use dump::*;
pub use error::*;
pub use html::*;
pub use loader::*;
pub use phase::*;
pub use printer::*;
pub use profile::*;
pub use task::*;
pub use timefmt::*;
