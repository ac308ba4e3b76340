//! # CLI Module
//!
//! Command-line tooling for inspecting a routing table declared in a
//! [manifest](crate::manifest) without writing an application around it.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print every route in matching order:
//!
//! ```bash
//! cometroute routes --manifest routes.toml
//! ```
//!
//! ### `match`
//!
//! Show which route a request would hit and what it captures:
//!
//! ```bash
//! cometroute match --manifest routes.toml --method GET /user/42?tab=posts
//! ```
//!
//! The path goes through the same normalization as a dispatched request
//! (query, fragment and mount prefix removed). A miss exits non-zero.
//!
//! ### `url`
//!
//! Generate the path of a named route:
//!
//! ```bash
//! cometroute url --manifest routes.toml profile --param num=42
//! cometroute url --manifest routes.toml archive --value 2024 --value 05
//! ```
//!
//! `--param` fills placeholders by token, `--value` fills them left to right.
//!
//! `COMET_*` configuration variables are applied on top of the manifest's
//! `[config]` table.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use cometroute::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_command, Cli, Commands};
