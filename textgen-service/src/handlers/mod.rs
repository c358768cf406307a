//! HTTP handlers for the text generation service.

pub mod generate;
pub mod health;
