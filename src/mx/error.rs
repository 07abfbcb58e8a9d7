use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

/// Classified DNS lookup failure.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("DNS lookup for {domain} timed out")]
    TimedOut { domain: String },
    #[error("no DNS records found for {domain}")]
    NotFound { domain: String },
    #[error("DNS lookup for {domain} failed: {source}")]
    Other {
        domain: String,
        #[source]
        source: ResolveError,
    },
}

impl DnsError {
    pub(crate) fn timed_out(domain: impl Into<String>) -> Self {
        Self::TimedOut {
            domain: domain.into(),
        }
    }

    pub(crate) fn not_found(domain: impl Into<String>) -> Self {
        Self::NotFound {
            domain: domain.into(),
        }
    }

    /// Maps a resolver error onto the three lookup outcomes the verifier
    /// distinguishes. NXDOMAIN and empty answers both land in `NotFound`.
    pub(crate) fn from_resolve(domain: impl Into<String>, source: ResolveError) -> Self {
        match source.kind() {
            ResolveErrorKind::Timeout => Self::timed_out(domain),
            ResolveErrorKind::NoRecordsFound { .. } => Self::not_found(domain),
            _ => Self::Other {
                domain: domain.into(),
                source,
            },
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}
