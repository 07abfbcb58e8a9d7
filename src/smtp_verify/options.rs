use std::borrow::Cow;
use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for a single SMTP probe.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub port: u16,
    pub helo_domain: String,
    /// Envelope sender. Empty means `postmaster@<recipient domain>`.
    pub mail_from: String,
    /// Bound on the whole dialogue, connect through `RCPT TO` reply.
    pub timeout_ms: u64,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            helo_domain: "localhost".to_string(),
            mail_from: String::new(),
            timeout_ms: 30_000,
        }
    }
}

impl SmtpProbeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn helo_name<'a>(&'a self, fallback: &'a str) -> Cow<'a, str> {
        if self.helo_domain.trim().is_empty() {
            Cow::Borrowed(fallback)
        } else {
            Cow::Borrowed(self.helo_domain.as_str())
        }
    }

    pub fn mail_from<'a>(&'a self, domain: &str) -> Cow<'a, str> {
        if self.mail_from.is_empty() {
            Cow::Owned(format!("postmaster@{domain}"))
        } else {
            Cow::Borrowed(self.mail_from.as_str())
        }
    }
}
