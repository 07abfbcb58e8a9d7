//! The probe dialogue as an I/O-free state machine.
//!
//! [`Dialogue::on_bytes`] is fed whatever the socket produced. It buffers
//! until a complete reply is available, then either names the next command
//! to send or finishes with a [`ProbeOutcome`]. When several replies arrive
//! together, the last one answers the current stage.

use tracing::debug;

use super::error::SessionError;
use super::options::SmtpProbeOptions;
use super::types::{ProbeOutcome, SmtpReply, Stage};

/// The commands a probe will send, fixed before connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Envelope {
    pub helo: String,
    pub mail_from: String,
    pub recipient: String,
}

impl Envelope {
    pub(crate) fn new(recipient: &str, options: &SmtpProbeOptions) -> Self {
        let domain = recipient
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or(recipient);
        Self {
            helo: options.helo_name(domain).into_owned(),
            mail_from: options.mail_from(domain).into_owned(),
            recipient: recipient.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// No complete reply buffered yet.
    Pending,
    /// Send this command (without CRLF) and keep reading.
    Send(String),
    /// The dialogue is over; `QUIT` should follow.
    Finished(ProbeOutcome),
}

#[derive(Debug)]
pub(crate) struct Dialogue {
    stage: Stage,
    buffer: Vec<u8>,
    envelope: Envelope,
}

impl Dialogue {
    pub(crate) fn new(envelope: Envelope) -> Self {
        Self {
            stage: Stage::Greeting,
            buffer: Vec::new(),
            envelope,
        }
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn on_bytes(&mut self, bytes: &[u8]) -> Result<Step, SessionError> {
        self.buffer.extend_from_slice(bytes);
        let mut last = None;
        while let Some(reply) = take_reply(&mut self.buffer) {
            last = Some(reply?);
        }
        match last {
            None => Ok(Step::Pending),
            Some(reply) => Ok(self.advance(reply)),
        }
    }

    fn advance(&mut self, reply: SmtpReply) -> Step {
        debug!(stage = %self.stage, code = reply.code, "S: {}", reply.text());

        match self.stage {
            Stage::RcptTo if reply.code == Stage::RcptTo.expected_code() => {
                Step::Finished(ProbeOutcome::accepted(&reply))
            }
            Stage::RcptTo => Step::Finished(ProbeOutcome::rejected(&reply)),
            stage if reply.code != stage.expected_code() => {
                Step::Finished(ProbeOutcome::rejected(&reply))
            }
            Stage::Greeting => {
                let command = format!("HELO {}", self.envelope.helo);
                self.stage = Stage::Helo;
                Step::Send(command)
            }
            Stage::Helo => {
                let command = format!("MAIL FROM:<{}>", self.envelope.mail_from);
                self.stage = Stage::MailFrom;
                Step::Send(command)
            }
            Stage::MailFrom => {
                let command = format!("RCPT TO:<{}>", self.envelope.recipient);
                self.stage = Stage::RcptTo;
                Step::Send(command)
            }
        }
    }
}

/// Removes one complete reply from the front of `buffer`.
///
/// A reply is complete once a line without the `NNN-` continuation marker has
/// been terminated by `\n`. Returns `None` while more bytes are needed.
pub(crate) fn take_reply(buffer: &mut Vec<u8>) -> Option<Result<SmtpReply, SessionError>> {
    let mut start = 0;
    while let Some(offset) = buffer[start..].iter().position(|byte| *byte == b'\n') {
        let end = start + offset;
        let continuation = buffer[start..end].get(3) == Some(&b'-');
        if !continuation {
            let raw: Vec<u8> = buffer.drain(..=end).collect();
            return Some(parse_reply(&raw));
        }
        start = end + 1;
    }
    None
}

fn parse_reply(raw: &[u8]) -> Result<SmtpReply, SessionError> {
    let text = String::from_utf8_lossy(raw);
    let mut code = None;
    let mut lines = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let parsed = reply_code(line).ok_or_else(|| SessionError::malformed(line))?;
        code = Some(parsed);
        lines.push(line.get(4..).unwrap_or("").to_string());
    }
    Ok(SmtpReply {
        code: code.ok_or_else(|| SessionError::malformed(""))?,
        lines,
    })
}

/// Three digits, the first in `2..=5`, followed by a space, a `-` or nothing.
fn reply_code(line: &str) -> Option<u16> {
    let bytes = line.as_bytes();
    let digits = bytes.get(..3)?;
    if !digits.iter().all(u8::is_ascii_digit) || !(b'2'..=b'5').contains(&digits[0]) {
        return None;
    }
    if !matches!(bytes.get(3), None | Some(b' ' | b'-')) {
        return None;
    }
    line[..3].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialogue() -> Dialogue {
        Dialogue::new(Envelope::new(
            "user@example.com",
            &SmtpProbeOptions::default(),
        ))
    }

    fn send(step: Step) -> String {
        match step {
            Step::Send(command) => command,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    fn finished(step: Step) -> ProbeOutcome {
        match step {
            Step::Finished(outcome) => outcome,
            other => panic!("expected an outcome, got {other:?}"),
        }
    }

    fn reach_rcpt(d: &mut Dialogue) {
        send(d.on_bytes(b"220 mx.example.com ESMTP\r\n").unwrap());
        send(d.on_bytes(b"250 mx.example.com\r\n").unwrap());
        send(d.on_bytes(b"250 2.1.0 Ok\r\n").unwrap());
        assert_eq!(d.stage(), Stage::RcptTo);
    }

    #[test]
    fn walks_the_envelope_in_order() {
        let mut d = dialogue();
        assert_eq!(send(d.on_bytes(b"220 ready\r\n").unwrap()), "HELO localhost");
        assert_eq!(
            send(d.on_bytes(b"250 hello\r\n").unwrap()),
            "MAIL FROM:<postmaster@example.com>"
        );
        assert_eq!(
            send(d.on_bytes(b"250 ok\r\n").unwrap()),
            "RCPT TO:<user@example.com>"
        );
        let outcome = finished(d.on_bytes(b"250 2.1.5 Ok\r\n").unwrap());
        assert!(outcome.accepted);
        assert_eq!(outcome.response_code, 250);
    }

    #[test]
    fn waits_for_a_full_line() {
        let mut d = dialogue();
        assert_eq!(d.on_bytes(b"22").unwrap(), Step::Pending);
        assert_eq!(d.on_bytes(b"0 rea").unwrap(), Step::Pending);
        assert_eq!(send(d.on_bytes(b"dy\r\n").unwrap()), "HELO localhost");
    }

    #[test]
    fn multiline_reply_waits_for_final_line() {
        let mut d = dialogue();
        send(d.on_bytes(b"220-mx.example.com\r\n220 ESMTP\r\n").unwrap());
        assert_eq!(d.on_bytes(b"250-mx.example.com\r\n250-SIZE 1000\r\n").unwrap(), Step::Pending);
        assert_eq!(
            send(d.on_bytes(b"250 HELP\r\n").unwrap()),
            "MAIL FROM:<postmaster@example.com>"
        );
    }

    #[test]
    fn final_line_code_governs() {
        let mut d = dialogue();
        reach_rcpt(&mut d);
        let outcome = finished(d.on_bytes(b"250-looks fine\r\n550 5.1.1 no such user\r\n").unwrap());
        assert!(!outcome.accepted);
        assert_eq!(outcome.response_code, 550);
    }

    #[test]
    fn bare_newlines_are_accepted() {
        let mut d = dialogue();
        assert_eq!(send(d.on_bytes(b"220 ready\n").unwrap()), "HELO localhost");
    }

    #[test]
    fn rejected_greeting_ends_dialogue() {
        let mut d = dialogue();
        let outcome = finished(d.on_bytes(b"554 5.7.1 go away\r\n").unwrap());
        assert!(!outcome.accepted);
        assert!(!outcome.is_temporary);
        assert_eq!(outcome.response_code, 554);
        assert_eq!(d.stage(), Stage::Greeting);
    }

    #[test]
    fn busy_greeting_is_temporary() {
        let mut d = dialogue();
        let outcome = finished(d.on_bytes(b"421 too busy\r\n").unwrap());
        assert!(outcome.is_temporary);
    }

    #[test]
    fn unexpected_success_code_is_a_rejection() {
        let mut d = dialogue();
        send(d.on_bytes(b"220 ready\r\n").unwrap());
        let outcome = finished(d.on_bytes(b"220 again?\r\n").unwrap());
        assert!(!outcome.accepted);
        assert!(!outcome.is_temporary);
        assert_eq!(outcome.response_code, 220);
    }

    #[test]
    fn mail_from_soft_failure_stops_before_rcpt() {
        let mut d = dialogue();
        send(d.on_bytes(b"220 ready\r\n").unwrap());
        send(d.on_bytes(b"250 hello\r\n").unwrap());
        let outcome = finished(d.on_bytes(b"451 4.7.1 greylisted\r\n").unwrap());
        assert!(outcome.is_temporary);
        assert_eq!(outcome.response_text, "4.7.1 greylisted");
        assert_eq!(d.stage(), Stage::MailFrom);
    }

    #[test]
    fn rcpt_codes_other_than_250_reject() {
        for (bytes, code, temporary) in [
            (&b"550 5.1.1 unknown\r\n"[..], 550, false),
            (&b"452 4.2.2 mailbox full\r\n"[..], 452, true),
            (&b"251 will forward\r\n"[..], 251, false),
        ] {
            let mut d = dialogue();
            reach_rcpt(&mut d);
            let outcome = finished(d.on_bytes(bytes).unwrap());
            assert!(!outcome.accepted);
            assert_eq!(outcome.response_code, code);
            assert_eq!(outcome.is_temporary, temporary);
        }
    }

    #[test]
    fn garbage_is_malformed() {
        let mut d = dialogue();
        let err = d.on_bytes(b"hello there\r\n").expect_err("should fail");
        assert!(matches!(err, SessionError::MalformedReply(_)));
    }

    #[test]
    fn last_of_several_buffered_replies_answers() {
        let mut d = dialogue();
        send(d.on_bytes(b"220 hi\r\n").unwrap());
        assert_eq!(
            send(d.on_bytes(b"250 hello\r\n250 again\r\n").unwrap()),
            "MAIL FROM:<postmaster@example.com>"
        );
        assert_eq!(
            send(d.on_bytes(b"250 sender ok\r\n").unwrap()),
            "RCPT TO:<user@example.com>"
        );
        let outcome = finished(d.on_bytes(b"550 no such user\r\n").unwrap());
        assert!(!outcome.accepted);
        assert_eq!(outcome.response_code, 550);
        assert_eq!(outcome.response_text, "no such user");
    }

    #[test]
    fn trailing_partial_reply_stays_buffered() {
        let mut d = dialogue();
        assert_eq!(send(d.on_bytes(b"220 hi\r\n250 ear").unwrap()), "HELO localhost");
        assert_eq!(
            send(d.on_bytes(b"ly\r\n").unwrap()),
            "MAIL FROM:<postmaster@example.com>"
        );
    }

    #[test]
    fn reply_codes_need_three_digits() {
        for raw in [
            &b"+25 weird\r\n"[..],
            &b"25 short\r\n"[..],
            &b"025 low\r\n"[..],
            &b"2500 long\r\n"[..],
            &b"abc nope\r\n"[..],
            &b"\r\n"[..],
        ] {
            let mut buffer = raw.to_vec();
            let reply = take_reply(&mut buffer).expect("complete line");
            assert!(
                matches!(reply, Err(SessionError::MalformedReply(_))),
                "{:?}",
                String::from_utf8_lossy(raw)
            );
        }

        let mut buffer = b"250\r\n".to_vec();
        let reply = take_reply(&mut buffer).expect("complete").expect("valid");
        assert_eq!(reply.code, 250);
        assert_eq!(reply.text(), "");
    }

    #[test]
    fn take_reply_leaves_following_bytes() {
        let mut buffer = b"250 ok\r\n220 next".to_vec();
        let reply = take_reply(&mut buffer).expect("complete").expect("valid");
        assert_eq!(reply.code, 250);
        assert_eq!(buffer, b"220 next");
        assert!(take_reply(&mut buffer).is_none());
    }

    #[test]
    fn envelope_uses_recipient_domain_for_sender() {
        let options = SmtpProbeOptions {
            helo_domain: "probe.example.net".to_string(),
            ..SmtpProbeOptions::default()
        };
        let envelope = Envelope::new("a@b.example", &options);
        assert_eq!(envelope.helo, "probe.example.net");
        assert_eq!(envelope.mail_from, "postmaster@b.example");
    }
}
