//! Pure domain logic for the kitab marketplace.
//!
//! This crate has no I/O: everything here is deterministic computation and
//! shared types consumed by `kitab-db` and `kitab-api`.

pub mod condition;
pub mod error;
pub mod listing;
pub mod notification;
pub mod types;
