use thiserror::Error;

/// Failures that prevent a verification from starting at all. Everything
/// that happens once the resolver exists is reported as a verdict.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl VerifyError {
    pub(crate) fn resolver_init(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::ResolverInit { source }
    }
}
