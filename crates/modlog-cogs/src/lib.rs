//! # Modlog Cogs
//!
//! Event-driven logging cogs for the modlog bot.
//!
//! Platform events are turned into before/after snapshots, diffed into
//! embeds by the change formatters and delivered to the log channel a guild
//! configured for the matching [`LogCategory`](modlog_common::LogCategory).
//! Cogs subscribe to event kinds through the [`EventRouter`], which is built
//! once at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cog;
pub mod dispatcher;
pub mod embed;
pub mod error;
pub mod event;
pub mod fields;
pub mod formatter;
pub mod resolver;
pub mod router;
pub mod server_log;
pub mod snapshot;
pub mod store;
pub mod voice;
pub mod voice_log;

pub use cog::*;
pub use dispatcher::*;
pub use embed::*;
pub use error::*;
pub use event::*;
pub use fields::*;
pub use formatter::*;
pub use resolver::*;
pub use router::*;
pub use server_log::*;
pub use snapshot::*;
pub use store::*;
pub use voice::*;
pub use voice_log::*;
