use tracing::debug;

use super::options::SmtpProbeOptions;
use super::probe::probe_mailbox;
use super::util::synthetic_local_part;

/// Whether `host` accepts a recipient at `domain` that cannot exist.
///
/// Runs a fresh probe for a synthetic address. Only an explicit acceptance
/// counts; rejections, timeouts and connection failures all read as "not
/// catch-all".
pub async fn detect_catch_all(host: &str, domain: &str, options: &SmtpProbeOptions) -> bool {
    let recipient = format!("{}@{domain}", synthetic_local_part());
    let outcome = probe_mailbox(host, &recipient, options).await;
    debug!(host, %recipient, %outcome, "catch-all probe");
    outcome.accepted
}
