//! Project progress dashboard.
//!
//! Loads one [`models::ProgressDocument`] per page load and renders it into a status table,
//! agent cards and an activity log. The status table can be filtered by status and by
//! free-text query.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod models;
pub mod page;
pub mod render;
pub mod server;
