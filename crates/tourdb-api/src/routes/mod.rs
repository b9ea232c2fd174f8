//! HTTP route modules.

pub mod dashboard;
pub mod health;
pub mod schema;
pub mod status;
