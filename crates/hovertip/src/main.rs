//! # Hovertip CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/hovertip/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Actor loading, viewer + token wiring (commands.rs)       │
//! │  - Column layout and styles (render.rs, styles.rs)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  hovertipapp                                                │
//! │  - Hovertip facade, assembly, visibility, normalization     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything inside `hovertipapp` returns plain data; this crate decides how
//! it looks in a terminal.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
