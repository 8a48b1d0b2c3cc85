//! Row structs and request DTOs, one module per table.

pub mod condition;
pub mod conversation;
pub mod listing;
pub mod message;
pub mod notification;
pub mod rating;
pub mod session;
pub mod user;
