//! SMTP deliverability probing.
//!
//! [`probe_mailbox`] drives `HELO` / `MAIL FROM` / `RCPT TO` against one mail
//! exchanger and reports a [`ProbeOutcome`]; [`detect_catch_all`] reuses it
//! with a synthetic recipient. No message data is ever sent.

mod catchall;
mod dialogue;
mod error;
mod options;
mod probe;
mod session;
mod types;
mod util;

#[cfg(test)]
pub(crate) mod mock;

pub use catchall::detect_catch_all;
pub use error::SessionError;
pub use options::SmtpProbeOptions;
pub use probe::probe_mailbox;
pub use types::{ProbeFailure, ProbeOutcome, SmtpReply, Stage};
pub use util::synthetic_local_part;

pub(crate) use probe::probe_exchangers;
