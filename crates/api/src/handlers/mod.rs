//! Request handlers.
//!
//! Each submodule owns the handlers for one resource. Handlers delegate to
//! the matching repository in `welfare_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod about;
pub mod admin;
pub mod auth;
pub mod contact;
pub mod donation;
pub mod donor;
pub mod project;
pub mod statistics;
pub mod upload;
