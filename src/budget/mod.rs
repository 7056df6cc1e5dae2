//! Token and byte accounting for output budgets

pub mod estimator;

pub use estimator::{BpeTokenCounter, TokenCounter, TokenEstimate, byte_size, estimate_tokens};
