//! HTTP handlers for the prompt gateway.

pub mod generate;
pub mod health;
