//! Pure domain logic for the GameVault marketplace.
//!
//! Everything in this crate is synchronous and side-effect free: pricing
//! arithmetic, trade settlement, rental quoting, cart state, and input
//! validation. All money values are integer cents.

pub mod cart;
pub mod error;
pub mod pricing;
pub mod rental;
pub mod trade;
pub mod types;
pub mod validation;
