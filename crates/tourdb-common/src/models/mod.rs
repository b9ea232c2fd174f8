//! Report and wire models shared by the applier, the API, and the CLI.

pub mod report;

pub use report::*;
