//! # Modlog Bot
//!
//! Discord moderation logging bot.
//!
//! This is the main binary crate that wires the log channel store, the
//! logging cogs and the command framework into a serenity client and keeps
//! it running across owner-requested restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
