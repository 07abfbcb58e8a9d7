//! DNS resolution of a domain's mail destination.
//!
//! MX records are looked up first; domains without them fall back to an
//! address-record existence check. Failures are classified into
//! [`DnsError`] so callers can tell a timeout from a missing domain.

mod error;
pub(crate) mod resolver;
mod types;

pub use error::DnsError;
pub use types::MxRecord;

pub(crate) use types::Destination;
