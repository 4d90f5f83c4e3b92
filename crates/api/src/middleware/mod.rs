//! Request gatekeeping.
//!
//! - [`auth::RequireAdmin`] -- an active admin account from a bearer token.
//! - [`auth::AuthDonor`] -- an active donor account from a bearer token.
//! - [`auth::OptionalDonor`] -- a donor account when a valid donor token is present.
//! - [`upload`] -- multipart file collection with type and size gates.

pub mod auth;
pub mod upload;
