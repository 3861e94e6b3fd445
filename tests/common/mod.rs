//! Common test utilities for mint integration tests.

#![allow(dead_code)]

pub mod cli;
