use crate::smtp_verify::{ProbeFailure, ProbeOutcome};

use super::types::{Confidence, VerificationResult};

pub const INVALID_FORMAT: &str = "Invalid email format";
pub const DOMAIN_MISSING: &str = "Domain does not exist";
pub const NO_MX_DOMAIN_EXISTS: &str = "No MX record, domain exists";
pub const ACCEPTED_CATCH_ALL: &str = "Email accepted but domain is catch-all";
pub const ACCEPTED: &str = "Email accepted by mail server";
pub const REJECTED: &str = "Email rejected by mail server";
pub const TIMED_OUT: &str = "SMTP server timeout (domain likely valid)";

pub(crate) fn invalid_format() -> VerificationResult {
    VerificationResult::new(false, Confidence::Invalid, INVALID_FORMAT, false)
}

pub(crate) fn domain_missing() -> VerificationResult {
    VerificationResult::new(false, Confidence::Invalid, DOMAIN_MISSING, false)
}

pub(crate) fn no_mx_domain_exists() -> VerificationResult {
    VerificationResult::new(true, Confidence::Low, NO_MX_DOMAIN_EXISTS, false)
}

/// DNS or SMTP timeouts are read optimistically.
pub(crate) fn timed_out() -> VerificationResult {
    VerificationResult::new(true, Confidence::Medium, TIMED_OUT, false)
}

/// Maps a probe outcome and the catch-all check onto a verdict.
///
/// Soft rejections count as valid with medium confidence: servers throttle
/// probes far more often than they signal a missing mailbox with a 4xx.
pub(crate) fn classify_probe(outcome: &ProbeOutcome, is_catch_all: bool) -> VerificationResult {
    if outcome.accepted {
        return if is_catch_all {
            VerificationResult::new(true, Confidence::Medium, ACCEPTED_CATCH_ALL, true)
        } else {
            VerificationResult::new(true, Confidence::High, ACCEPTED, false)
        };
    }

    match outcome.failure {
        Some(ProbeFailure::TimedOut) => timed_out(),
        Some(ProbeFailure::Connection) => VerificationResult::new(
            false,
            Confidence::Low,
            outcome.response_text.clone(),
            false,
        ),
        None if outcome.is_temporary => VerificationResult::new(
            true,
            Confidence::Medium,
            format!(
                "Temporary rejection ({}): {}",
                outcome.response_code, outcome.response_text
            ),
            false,
        ),
        None if outcome.response_code >= 500 => VerificationResult::new(
            false,
            Confidence::Invalid,
            format!(
                "Permanently rejected ({}): {}",
                outcome.response_code, outcome.response_text
            ),
            false,
        ),
        None => VerificationResult::new(false, Confidence::Invalid, REJECTED, false),
    }
}
