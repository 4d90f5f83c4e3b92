//! Row models and DTOs, one module per table.

pub mod about;
pub mod admin;
pub mod contact;
pub mod donation;
pub mod donation_settings;
pub mod donor;
pub mod project;
pub mod statistics;
