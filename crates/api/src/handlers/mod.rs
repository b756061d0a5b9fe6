//! Request handlers, grouped by resource. Routing lives in [`crate::routes`].

pub mod admin;
pub mod auth;
pub mod cart;
pub mod financials;
pub mod games;
pub mod knowledge_base;
pub mod purchases;
pub mod rentals;
pub mod support;
pub mod trades;
pub mod upload;
