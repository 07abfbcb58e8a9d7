use tokio::time::timeout;
use tracing::{debug, warn};

use crate::mx::MxRecord;

use super::dialogue::{Dialogue, Envelope, Step};
use super::error::SessionError;
use super::options::SmtpProbeOptions;
use super::session::SmtpSession;
use super::types::ProbeOutcome;

/// Asks `host` whether it would accept mail for `recipient`, without sending
/// any message data.
///
/// The whole dialogue, connect included, is raced against
/// [`SmtpProbeOptions::timeout`]. Losing the race drops the socket and yields
/// [`ProbeOutcome::timed_out`]. A reply that cannot be parsed is a
/// rejection; any transport error yields [`ProbeOutcome::connection_failed`].
pub async fn probe_mailbox(
    host: &str,
    recipient: &str,
    options: &SmtpProbeOptions,
) -> ProbeOutcome {
    let envelope = Envelope::new(recipient, options);
    match timeout(options.timeout(), run_dialogue(host, options.port, envelope)).await {
        Ok(Ok(outcome)) => {
            debug!(host, recipient, %outcome, "probe finished");
            outcome
        }
        Ok(Err(SessionError::MalformedReply(line))) => {
            warn!(host, recipient, %line, "malformed reply, treating as rejection");
            ProbeOutcome::protocol_violation(&line)
        }
        Ok(Err(err)) => {
            debug!(host, recipient, error = %err, "probe failed");
            ProbeOutcome::connection_failed()
        }
        Err(_) => {
            warn!(host, recipient, timeout_ms = options.timeout_ms, "probe timed out");
            ProbeOutcome::timed_out()
        }
    }
}

/// Probes exchangers in preference order, up to `limit` of them. Only a
/// connection failure moves on to the next exchanger.
pub(crate) async fn probe_exchangers<'a>(
    records: &'a [MxRecord],
    recipient: &str,
    options: &SmtpProbeOptions,
    limit: usize,
) -> Option<(&'a MxRecord, ProbeOutcome)> {
    let mut candidates = records.iter().take(limit.max(1));
    let mut record = candidates.next()?;
    let mut outcome = probe_mailbox(&record.exchange, recipient, options).await;
    for next in candidates {
        if !outcome.is_connection_failure() {
            break;
        }
        debug!(failed = %record.exchange, next = %next.exchange, "trying next exchanger");
        record = next;
        outcome = probe_mailbox(&record.exchange, recipient, options).await;
    }
    Some((record, outcome))
}

async fn run_dialogue(
    host: &str,
    port: u16,
    envelope: Envelope,
) -> Result<ProbeOutcome, SessionError> {
    let mut session = SmtpSession::connect(host, port).await?;
    let mut dialogue = Dialogue::new(envelope);
    let result = drive(&mut session, &mut dialogue).await;
    session.quit().await;
    result
}

async fn drive(
    session: &mut SmtpSession,
    dialogue: &mut Dialogue,
) -> Result<ProbeOutcome, SessionError> {
    loop {
        let chunk = session.read_chunk().await?;
        match dialogue.on_bytes(chunk)? {
            Step::Pending => {}
            Step::Send(command) => session.send_command(&command).await?,
            Step::Finished(outcome) => return Ok(outcome),
        }
    }
}
