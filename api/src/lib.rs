//! HTTP layer of the Cashflow backend
//!
//! Exposes the application factory and its pieces so integration tests can
//! build the same app the binary serves, wired to in-memory stores.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
