pub mod conversation;
pub mod financials;
pub mod game;
pub mod knowledge_base;
pub mod purchase;
pub mod rental;
pub mod trade;
pub mod user;
