//! # Modlog Commands
//!
//! Prefix and slash commands for the modlog bot using the Poise framework.
//!
//! This crate holds the shared framework data, the owner-only `sudo` group
//! that controls the bot lifecycle and cogs, and the `logchannel` group that
//! moderators use to pick where logs are posted.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod framework;
pub mod lifecycle;
pub mod log_channel;
pub mod sudo;

pub use framework::*;
pub use lifecycle::*;
