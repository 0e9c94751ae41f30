//! Testing infrastructure for chatfork integration tests.
//!
//! This crate provides utilities for writing integration tests:
//! - `fixtures`: Sample files and JSON builders for each export format
//! - `messages`: Canonical message trees for graph and view tests
//! - `assertions`: Checks over the CLI's JSON output
//! - `TestWorld`: Isolated temp directory for running the `chatfork` binary

pub mod assertions;
pub mod fixtures;
pub mod messages;
pub mod world;

pub use messages::MessageTree;
pub use world::TestWorld;
