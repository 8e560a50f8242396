//! HTTP handlers for users, products and login.

pub mod auth;
pub mod entity;
pub mod products;
pub mod users;
