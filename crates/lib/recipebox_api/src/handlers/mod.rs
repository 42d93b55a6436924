//! Request handlers.

pub mod generate;
pub mod recipes;
pub mod texts;
