//! # CLI Layer
//!
//! This is **one possible host** for hovertip: it loads an actor from a JSON
//! file, plays a single hover for one viewer, and prints what the tooltip
//! would show. It is the only place that knows about stdout, stderr and exit
//! codes.
//!
//! ## Commands
//!
//! - `hovertip show <actor.json>`: hover as `--user <id>` (or `--gm`) and print
//!   the tooltip, or `No tooltip` when the viewer gets none.
//! - `hovertip settings`: print the effective settings as TOML.
//!
//! `--settings <file>` layers a TOML file over the defaults; `HOVERTIP_*`
//! environment variables override both.
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing-subscriber`. The filter comes from
//! `HOVERTIP_LOG` (e.g. `HOVERTIP_LOG=hovertipapp=trace`); `-v` defaults it
//! to `debug`, otherwise only warnings show.
//!
//! ## Module Structure
//!
//! - `commands`: Entry point and per-command handlers
//! - `render`: Column layout and styled output
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
