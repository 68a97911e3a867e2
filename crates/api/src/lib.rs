//! Layout editor API server library.
//!
//! Exposes config, state, error handling, authentication, routes and the
//! router builder so integration tests and the binary entrypoint share them.

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
