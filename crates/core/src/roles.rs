//! Account kinds and admin role names.
//!
//! The account kind travels inside every bearer token so the auth extractors
//! know which table the subject id refers to.

/// Token subject is a row in `admins`.
pub const ACCOUNT_ADMIN: &str = "admin";
/// Token subject is a row in `donors`.
pub const ACCOUNT_DONOR: &str = "donor";

/// Role assigned to newly registered admins. Must match the column default
/// in `20260101000002_create_admins.sql`.
pub const ROLE_ADMIN: &str = "admin";
