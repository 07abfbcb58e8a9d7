#![forbid(unsafe_code)]
//! mailprobe_lib: checks whether an e-mail address is deliverable by asking
//! its mail exchanger, without sending a message.
//!
//! ```no_run
//! # async fn run() -> Result<(), mailprobe_lib::VerifyError> {
//! let result = mailprobe_lib::verify("alice@example.com").await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

pub mod mx;
pub mod smtp_verify;
pub mod validator;
mod verify;

pub use mx::{DnsError, MxRecord};
pub use smtp_verify::{ProbeOutcome, SmtpProbeOptions, detect_catch_all, probe_mailbox};
pub use validator::{EmailError, EmailParts, extract_address, extract_domain};
pub use verify::{
    Confidence, DebugInfo, VerificationResult, VerifyError, VerifyOptions, classify,
    verify, verify_with_options,
};
