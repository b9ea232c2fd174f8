//! # tourdb-common
//!
//! Shared configuration, error handling, and report models used across all tourdb crates.
//! No database or HTTP logic lives here, only the contracts between them.

pub mod config;
pub mod error;
pub mod models;
