//! `mint` - Local file-backed issue tracker
//!
//! This crate provides the `mint` CLI on top of [`mint_lib`], which owns the
//! issue graph, ID generation, and the YAML document.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML configuration and document discovery
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;

pub use cli::run;
