//! HTTP handlers, one module per resource.

pub mod auth;
pub mod condition;
pub mod favorite;
pub mod listing;
pub mod message;
pub mod notification;
pub mod rating;
pub mod user;
