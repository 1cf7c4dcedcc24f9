//! # Modlog Config
//!
//! Type-safe configuration management for the modlog bot.
//!
//! This crate provides configuration loading from YAML with environment
//! overrides, validation, and a lock-free cache for the live configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
