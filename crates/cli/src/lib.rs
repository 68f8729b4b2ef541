//! Trolley CLI library.
//!
//! The `trolley` binary is a thin clap front end over these modules:
//!
//! - [`config`] - environment configuration
//! - [`files`] - snapshot and catalog file I/O
//! - [`render`] - text for the shop, print and share surfaces
//! - [`feed`] - change notification for live views
//! - [`commands`] - one function per subcommand

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod files;
pub mod render;

pub use config::TrolleyConfig;
pub use error::{CliError, Result};
