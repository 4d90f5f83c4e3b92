//! Domain rules for the welfare organisation backend.
//!
//! Everything in this crate is pure logic with no I/O: enumerations and
//! their validation, the static currency table, donation reference and
//! formatting helpers, payment-gateway response parsing, and the small bits
//! of arithmetic behind the statistics endpoints.

pub mod contact;
pub mod currency;
pub mod donation;
pub mod error;
pub mod payment;
pub mod project;
pub mod roles;
pub mod statistics;
pub mod types;
pub mod upload;
pub mod validation;
