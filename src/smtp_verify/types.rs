use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Dialogue stage awaiting a server reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Greeting,
    Helo,
    MailFrom,
    RcptTo,
}

impl Stage {
    /// Reply code that lets the dialogue move past this stage. `RCPT TO` is
    /// terminal whatever the code.
    pub fn expected_code(self) -> u16 {
        match self {
            Self::Greeting => 220,
            Self::Helo | Self::MailFrom | Self::RcptTo => 250,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greeting => f.write_str("greeting"),
            Self::Helo => f.write_str("HELO"),
            Self::MailFrom => f.write_str("MAIL FROM"),
            Self::RcptTo => f.write_str("RCPT TO"),
        }
    }
}

/// A complete SMTP reply. `code` is taken from the final line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Why a probe ended without any server verdict.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    TimedOut,
    Connection,
}

/// Result of one SMTP probe for one recipient.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub accepted: bool,
    /// Governing reply code, `0` when no reply decided the outcome.
    pub response_code: u16,
    pub response_text: String,
    pub is_temporary: bool,
    pub failure: Option<ProbeFailure>,
}

impl ProbeOutcome {
    pub(crate) fn accepted(reply: &SmtpReply) -> Self {
        Self {
            accepted: true,
            response_code: reply.code,
            response_text: reply.text(),
            is_temporary: false,
            failure: None,
        }
    }

    pub(crate) fn rejected(reply: &SmtpReply) -> Self {
        Self {
            accepted: false,
            response_code: reply.code,
            response_text: reply.text(),
            is_temporary: reply.is_transient_failure(),
            failure: None,
        }
    }

    /// The server answered with something that is not an SMTP reply. Counts
    /// as a permanent rejection, not a transport failure.
    pub(crate) fn protocol_violation(line: &str) -> Self {
        Self {
            accepted: false,
            response_code: 0,
            response_text: format!("Malformed reply: {}", line.trim()),
            is_temporary: false,
            failure: None,
        }
    }

    pub(crate) fn timed_out() -> Self {
        Self::failed(ProbeFailure::TimedOut, "Connection timeout")
    }

    pub(crate) fn connection_failed() -> Self {
        Self::failed(ProbeFailure::Connection, "Connection failed")
    }

    fn failed(failure: ProbeFailure, text: &str) -> Self {
        Self {
            accepted: false,
            response_code: 0,
            response_text: text.to_string(),
            is_temporary: true,
            failure: Some(failure),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.failure == Some(ProbeFailure::TimedOut)
    }

    pub fn is_connection_failure(&self) -> bool {
        self.failure == Some(ProbeFailure::Connection)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.accepted, self.failure) {
            (true, _) => write!(f, "accepted ({} {})", self.response_code, self.response_text),
            (false, Some(_)) => f.write_str(&self.response_text),
            (false, None) => write!(f, "rejected ({} {})", self.response_code, self.response_text),
        }
    }
}
