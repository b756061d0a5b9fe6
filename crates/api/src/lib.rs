//! GameVault API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! session cart store) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod carts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
