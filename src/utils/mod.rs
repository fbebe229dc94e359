//! File helpers for the CLI.

pub mod persistence;
