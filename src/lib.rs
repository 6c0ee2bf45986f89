//! `sales-dash` library crate.
//!
//! The binary (`salesdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future exports, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod agg;
pub mod app;
pub mod charts;
pub mod cli;
pub mod data;
pub mod decompose;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod web;
