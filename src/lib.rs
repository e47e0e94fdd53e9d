//! Orchestration layer of the HRM admin console.
//!
//! The HRM backend owns all persistent data. This crate aggregates attendance
//! across the roster, keeps the per-view caches and the toast queue, and
//! serves them to the single-page UI.

pub mod api;
pub mod client;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
