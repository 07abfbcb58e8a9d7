//! The verification pipeline: extract, resolve, probe, detect catch-all,
//! classify.

pub mod classify;
mod error;
mod options;
mod types;

pub use error::VerifyError;
pub use options::VerifyOptions;
pub use types::{Confidence, DebugInfo, VerificationResult};

use tracing::{debug, info};

use crate::mx::{
    Destination,
    resolver::{self, LookupMx},
};
use crate::smtp_verify::{detect_catch_all, probe_exchangers};
use crate::validator::{EmailError, EmailParts, extract_address};

/// Verifies `email` with default options.
pub async fn verify(email: &str) -> Result<VerificationResult, VerifyError> {
    verify_with_options(email, &VerifyOptions::default()).await
}

/// Verifies `email` using the system resolver.
///
/// Malformed addresses, missing domains and every network outcome are
/// reported as a [`VerificationResult`]. The only error is failing to build
/// the resolver, which is only attempted once the address has been split.
pub async fn verify_with_options(
    email: &str,
    options: &VerifyOptions,
) -> Result<VerificationResult, VerifyError> {
    let parts = match extract_address(email) {
        Ok(parts) => parts,
        Err(err) => return Ok(malformed(email, &err, options)),
    };
    let resolver = resolver::system_resolver().map_err(VerifyError::resolver_init)?;
    Ok(verify_parts(email, &parts, options, &resolver).await)
}

#[cfg(test)]
pub(crate) async fn verify_with_resolver<R: LookupMx>(
    email: &str,
    options: &VerifyOptions,
    resolver_impl: &R,
) -> VerificationResult {
    match extract_address(email) {
        Ok(parts) => verify_parts(email, &parts, options, resolver_impl).await,
        Err(err) => malformed(email, &err, options),
    }
}

fn malformed(email: &str, err: &EmailError, options: &VerifyOptions) -> VerificationResult {
    debug!(email, error = %err, "malformed address");
    classify::invalid_format().with_debug(options.debug, DebugInfo::NONE)
}

async fn verify_parts<R: LookupMx>(
    email: &str,
    parts: &EmailParts,
    options: &VerifyOptions,
    resolver_impl: &R,
) -> VerificationResult {
    let destination =
        resolver::resolve_destination(resolver_impl, &parts.ascii_domain, options.dns_timeout())
            .await;
    let records = match destination {
        Destination::Exchangers(records) => records,
        Destination::AddressOnly => {
            return classify::no_mx_domain_exists().with_debug(options.debug, DebugInfo::NONE);
        }
        Destination::Missing => {
            return classify::domain_missing().with_debug(options.debug, DebugInfo::NONE);
        }
        Destination::TimedOut => {
            return classify::timed_out().with_debug(options.debug, DebugInfo::TIMEOUT);
        }
    };

    let recipient = parts.recipient();
    let Some((record, outcome)) =
        probe_exchangers(&records, &recipient, &options.probe, options.max_mx).await
    else {
        return classify::domain_missing().with_debug(options.debug, DebugInfo::NONE);
    };

    let is_catch_all = outcome.accepted
        && options.catch_all
        && detect_catch_all(&record.exchange, &parts.ascii_domain, &options.probe).await;

    let result = classify::classify_probe(&outcome, is_catch_all);
    info!(
        email,
        mx = %record.exchange,
        valid = result.valid,
        confidence = %result.confidence,
        "verification finished"
    );

    let mx_record = if outcome.is_timeout() {
        DebugInfo::TIMEOUT
    } else {
        record.exchange.as_str()
    };
    result.with_debug(options.debug, mx_record)
}
