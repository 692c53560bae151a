//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;
mod types;


pub use cli::{Command, DeviceArgs, LookArgs};
pub use types::PositiveU64;

pub(crate) use parsers::{parse_duration, parse_window};
