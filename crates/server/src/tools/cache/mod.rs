//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and clearing the stored caches.

pub mod clear;
pub mod purge;
pub mod stats;

pub use clear::{CacheClearOutput, clear_impl};
pub use purge::{CachePurgeOutput, purge_impl};
pub use stats::stats_impl;
