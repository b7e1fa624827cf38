//! # Scoredb Architecture
//!
//! Scoredb manages a flat directory of LilyPond score excerpts. The
//! interesting work (typesetting, MIDI generation, PDF concatenation) is done
//! by external programs; this crate decides which files to hand them, where
//! their output goes, and how failures are reported.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, installs Ctrl-C hook  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Acquires one Workspace per rendering action              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Checkout, integrity check, export, ...                   │
//! │  - Streams progress through a Reporter, returns CmdResult   │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                        │
//!                    ▼                        ▼
//! ┌────────────────────────────┐ ┌──────────────────────────────┐
//! │  Store (store.rs)          │ │  Toolchain (tools/)          │
//! │  - Data directory listing  │ │  - ProcessTools (production) │
//! │  - ID → file matching      │ │  - FakeTools (testing)       │
//! └────────────────────────────┘ └──────────────────────────────┘
//! ```
//!
//! ## Temporary Files
//!
//! Render output lands in a [`workspace::Workspace`], an owned temp directory
//! removed when dropped. Errors and Ctrl-C unwind normally (the interrupt is a
//! polled flag, never a process exit), so the directory is removed on every
//! path unless a command explicitly keeps it.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against a temp database with `FakeTools`.
//! 2. **API**: dispatch and workspace lifetime.
//! 3. **CLI**: `tests/` drives the binary with `assert_cmd`, using a shell
//!    script standing in for LilyPond on Unix.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade, the entry point for all actions
//! - [`commands`]: One module per action
//! - [`config`]: `scoredb.json`, which also marks a database root
//! - [`error`]: Error type and exit codes
//! - [`init`]: Database root discovery and context setup
//! - [`interrupt`]: Ctrl-C flag
//! - [`model`]: Excerpt IDs
//! - [`store`]: Data directory access
//! - [`tools`]: External programs
//! - [`workspace`]: Scoped temp directory

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod interrupt;
pub mod model;
pub mod store;
pub mod tools;
pub mod workspace;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
