//! Contact message statuses.

use crate::error::CoreError;
use crate::validation::validate_one_of;

pub const STATUS_NEW: &str = "new";
pub const STATUS_READ: &str = "read";
pub const STATUS_REPLIED: &str = "replied";
pub const STATUS_ARCHIVED: &str = "archived";

pub const VALID_STATUSES: &[&str] = &[STATUS_NEW, STATUS_READ, STATUS_REPLIED, STATUS_ARCHIVED];

/// Page size for the admin inbox when none is given.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_one_of(status, VALID_STATUSES, "message status")
}
