//! Project category and status constants, funding arithmetic, and field
//! validation.

use crate::error::CoreError;
use crate::validation::validate_one_of;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_HEALTHCARE: &str = "healthcare";
pub const CATEGORY_EDUCATION: &str = "education";
pub const CATEGORY_EMERGENCY: &str = "emergency";
pub const CATEGORY_FOOD: &str = "food";
pub const CATEGORY_SHELTER: &str = "shelter";
pub const CATEGORY_OTHER: &str = "other";

pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_HEALTHCARE,
    CATEGORY_EDUCATION,
    CATEGORY_EMERGENCY,
    CATEGORY_FOOD,
    CATEGORY_SHELTER,
    CATEGORY_OTHER,
];

pub const DEFAULT_CATEGORY: &str = CATEGORY_HEALTHCARE;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ONGOING: &str = "ongoing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_UPCOMING: &str = "upcoming";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_ACTIVE,
    STATUS_ONGOING,
    STATUS_COMPLETED,
    STATUS_UPCOMING,
];

pub const DEFAULT_STATUS: &str = STATUS_ACTIVE;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_one_of(category, VALID_CATEGORIES, "project category")
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_one_of(status, VALID_STATUSES, "project status")
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Project title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_target_amount(target: f64) -> Result<(), CoreError> {
    if !target.is_finite() || target < 0.0 {
        return Err(CoreError::Validation(
            "Target amount cannot be negative".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Funding
// ---------------------------------------------------------------------------

/// Whole-number percentage of the target that has been raised.
///
/// Zero when no target is set. Not capped at 100.
pub fn percentage_raised(raised: f64, target: f64) -> i64 {
    if target <= 0.0 {
        return 0;
    }
    (raised / target * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn percentage_rounds() {
        assert_eq!(percentage_raised(0.0, 100_000.0), 0);
        assert_eq!(percentage_raised(5000.0, 100_000.0), 5);
        assert_eq!(percentage_raised(1.0, 3.0), 33);
        assert_eq!(percentage_raised(2.0, 3.0), 67);
    }

    #[test]
    fn percentage_without_target_is_zero() {
        assert_eq!(percentage_raised(5000.0, 0.0), 0);
    }

    #[test]
    fn percentage_can_exceed_hundred() {
        assert_eq!(percentage_raised(150.0, 100.0), 150);
    }

    #[test]
    fn statuses_include_ongoing() {
        assert!(validate_status(STATUS_ONGOING).is_ok());
        assert_matches!(validate_status("archived"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn categories() {
        for c in VALID_CATEGORIES {
            assert!(validate_category(c).is_ok());
        }
        assert_matches!(validate_category("sports"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_bounds() {
        assert!(validate_title("Clinic Build").is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert_matches!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)), Err(_));
        assert_matches!(validate_title("  "), Err(_));
    }

    #[test]
    fn negative_target_rejected() {
        assert!(validate_target_amount(0.0).is_ok());
        assert_matches!(validate_target_amount(-1.0), Err(CoreError::Validation(_)));
    }
}
