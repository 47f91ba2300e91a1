//! divid: content-addressed identifiers for hierarchical administrative divisions
//!
//! Reads a CSV with one column per hierarchy level, derives a stable
//! `{type_code}-{hash}` identifier for every row's node and its parent, and
//! writes either an enriched CSV or an SQL insert script.
//!
//! Layers:
//! - `domain`: normalization, hashing, type registry, hierarchy building (pure)
//! - `application`: CSV table reading, renderers, export services
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
