//! Shared utilities for Roomcast binaries and libraries.

pub mod logger;
pub mod time;
