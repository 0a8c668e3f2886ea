//! Command-line interface for the `lz4block` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program name, the shared `DISPLAY_LEVEL` atomic and the display macros. |
//! | [`args`]      | `clap` definitions of the global flags and subcommands. |
//! | [`commands`]  | `compress`, `decompress` and `bench` implementations. |
//!
//! Typical call sequence: `Cli::parse` → [`commands::run`].

pub mod args;
pub mod commands;
pub mod constants;
