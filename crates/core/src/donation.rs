//! Donation status, payment method and gateway constants, plus the pure
//! helpers behind donation intake: amount checks, initial status, ledger
//! direction, reference numbers and derived display fields.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::validate_one_of;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Awaiting manual confirmation (bank transfers).
pub const STATUS_PENDING: &str = "pending";
/// Handed to a payment gateway, awaiting its outcome.
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_REFUNDED: &str = "refunded";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_PROCESSING,
    STATUS_COMPLETED,
    STATUS_FAILED,
    STATUS_CANCELLED,
    STATUS_REFUNDED,
];

// ---------------------------------------------------------------------------
// Payment methods and gateways
// ---------------------------------------------------------------------------

pub const METHOD_BANK_TRANSFER: &str = "bank_transfer";
pub const METHOD_CREDIT_CARD: &str = "credit_card";
pub const METHOD_DEBIT_CARD: &str = "debit_card";
pub const METHOD_JAZZCASH: &str = "jazzcash";
pub const METHOD_EASYPAISA: &str = "easypaisa";
pub const METHOD_PAYPAL: &str = "paypal";

pub const VALID_PAYMENT_METHODS: &[&str] = &[
    METHOD_BANK_TRANSFER,
    METHOD_CREDIT_CARD,
    METHOD_DEBIT_CARD,
    METHOD_JAZZCASH,
    METHOD_EASYPAISA,
    METHOD_PAYPAL,
];

pub const DEFAULT_PAYMENT_METHOD: &str = METHOD_BANK_TRANSFER;

pub const GATEWAY_MANUAL: &str = "manual";
pub const GATEWAY_MEEZAN: &str = "meezan";
pub const GATEWAY_STRIPE: &str = "stripe";
pub const GATEWAY_PAYPAL: &str = "paypal";
pub const GATEWAY_RAZORPAY: &str = "razorpay";

pub const VALID_GATEWAYS: &[&str] = &[
    GATEWAY_MANUAL,
    GATEWAY_MEEZAN,
    GATEWAY_STRIPE,
    GATEWAY_PAYPAL,
    GATEWAY_RAZORPAY,
];

/// Receiving account recorded on every new donation.
pub const DEFAULT_BANK_NAME: &str = "Meezan Bank Limited";
pub const DEFAULT_BANK_ACCOUNT_TITLE: &str = "Pakistan Medico International";
pub const DEFAULT_BANK_SWIFT_CODE: &str = "MEZNPKKA";

/// Smallest accepted donation, in the donation's own currency.
pub const MIN_AMOUNT: f64 = 1.0;
/// Largest accepted donation once converted to PKR.
pub const MAX_CONVERTED_AMOUNT: f64 = 1_000_000_000_000.0;

/// Default and maximum page sizes for the admin donation list.
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if amount.is_finite() && amount >= MIN_AMOUNT {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Valid donation amount is required".into(),
        ))
    }
}

/// The PKR value must stay finite and within [`MAX_CONVERTED_AMOUNT`] so
/// totals and gateway minor units cannot overflow.
pub fn validate_converted_amount(converted: f64) -> Result<(), CoreError> {
    if converted.is_finite() && converted <= MAX_CONVERTED_AMOUNT {
        Ok(())
    } else {
        Err(CoreError::Validation("Donation amount is too large".into()))
    }
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_one_of(status, VALID_STATUSES, "donation status")
}

pub fn validate_payment_method(method: &str) -> Result<(), CoreError> {
    validate_one_of(method, VALID_PAYMENT_METHODS, "payment method")
}

// ---------------------------------------------------------------------------
// Intake helpers
// ---------------------------------------------------------------------------

/// Status a freshly submitted donation starts in.
pub fn initial_status(payment_method: &str) -> &'static str {
    if payment_method == METHOD_BANK_TRANSFER {
        STATUS_PENDING
    } else {
        STATUS_PROCESSING
    }
}

/// Gateway recorded on a freshly submitted donation.
pub fn gateway_for_method(payment_method: &str) -> &'static str {
    if payment_method == METHOD_BANK_TRANSFER {
        GATEWAY_MANUAL
    } else {
        GATEWAY_MEEZAN
    }
}

/// Whether the donation must be registered with the hosted payment page.
pub fn requires_gateway(payment_method: &str) -> bool {
    payment_method != METHOD_BANK_TRANSFER
}

/// Statuses that undo any credit previously applied to the project and
/// donor totals.
pub fn is_reversing_status(status: &str) -> bool {
    matches!(status, STATUS_FAILED | STATUS_CANCELLED | STATUS_REFUNDED)
}

/// What a status change means for the project/donor ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    Credit,
    Reverse,
    None,
}

/// Decide the ledger effect of moving a donation to `new_status` given
/// whether it is currently credited.
pub fn ledger_action(new_status: &str, credited: bool) -> LedgerAction {
    if new_status == STATUS_COMPLETED && !credited {
        LedgerAction::Credit
    } else if is_reversing_status(new_status) && credited {
        LedgerAction::Reverse
    } else {
        LedgerAction::None
    }
}

/// Human-readable reference: `PMI-<8-digit id>-<unix millis>`.
pub fn build_reference(id: DbId, unix_millis: i64) -> String {
    format!("PMI-{id:08}-{unix_millis}")
}

/// Short bank description shown to admins: `"<bank> - A/C <last 4>"`.
pub fn bank_summary(bank_name: Option<&str>, account_number: Option<&str>) -> Option<String> {
    match account_number.filter(|n| !n.is_empty()) {
        Some(number) => {
            let chars: Vec<char> = number.chars().collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            Some(format!("{} - A/C {tail}", bank_name.unwrap_or_default()))
        }
        None => bank_name.map(str::to_string),
    }
}

/// Last four characters of a card number, if present.
pub fn card_last4(card_number: &str) -> Option<String> {
    let digits: Vec<char> = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }
    Some(digits[digits.len() - 4..].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn amount_floor() {
        assert!(validate_amount(1.0).is_ok());
        assert!(validate_amount(5000.0).is_ok());
        assert_matches!(validate_amount(0.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_amount(-10.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_amount(0.5), Err(CoreError::Validation(_)));
        assert_matches!(validate_amount(f64::NAN), Err(CoreError::Validation(_)));
    }

    #[test]
    fn converted_amount_ceiling() {
        assert!(validate_converted_amount(MAX_CONVERTED_AMOUNT).is_ok());
        assert_matches!(
            validate_converted_amount(MAX_CONVERTED_AMOUNT * 2.0),
            Err(CoreError::Validation(_))
        );
        let overflowed = crate::currency::convert_to_pkr(1e308, crate::currency::USD);
        assert_matches!(
            validate_converted_amount(overflowed.converted_amount),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bank_transfer_starts_pending() {
        assert_eq!(initial_status(METHOD_BANK_TRANSFER), STATUS_PENDING);
        assert_eq!(gateway_for_method(METHOD_BANK_TRANSFER), GATEWAY_MANUAL);
        assert!(!requires_gateway(METHOD_BANK_TRANSFER));
    }

    #[test]
    fn card_payments_start_processing() {
        assert_eq!(initial_status(METHOD_CREDIT_CARD), STATUS_PROCESSING);
        assert_eq!(gateway_for_method(METHOD_CREDIT_CARD), GATEWAY_MEEZAN);
        assert!(requires_gateway(METHOD_JAZZCASH));
    }

    #[test]
    fn completion_credits_once() {
        assert_eq!(ledger_action(STATUS_COMPLETED, false), LedgerAction::Credit);
        assert_eq!(ledger_action(STATUS_COMPLETED, true), LedgerAction::None);
    }

    #[test]
    fn reversal_only_when_credited() {
        for s in [STATUS_FAILED, STATUS_CANCELLED, STATUS_REFUNDED] {
            assert_eq!(ledger_action(s, true), LedgerAction::Reverse);
            assert_eq!(ledger_action(s, false), LedgerAction::None);
        }
        assert_eq!(ledger_action(STATUS_PENDING, true), LedgerAction::None);
    }

    #[test]
    fn reference_is_zero_padded() {
        assert_eq!(build_reference(42, 1_700_000_000_000), "PMI-00000042-1700000000000");
    }

    #[test]
    fn bank_summary_masks_account() {
        assert_eq!(
            bank_summary(Some("Meezan Bank"), Some("0123456789")).as_deref(),
            Some("Meezan Bank - A/C 6789")
        );
        assert_eq!(bank_summary(Some("HBL"), None).as_deref(), Some("HBL"));
        assert_eq!(bank_summary(None, None), None);
        assert_eq!(bank_summary(Some("X"), Some("12")).as_deref(), Some("X - A/C 12"));
    }

    #[test]
    fn card_tail() {
        assert_eq!(card_last4("4111 1111 1111 1234").as_deref(), Some("1234"));
        assert_eq!(card_last4("12"), None);
    }

    #[test]
    fn unknown_method_rejected() {
        assert!(validate_payment_method("cash").is_err());
        for m in VALID_PAYMENT_METHODS {
            assert!(validate_payment_method(m).is_ok());
        }
    }
}
