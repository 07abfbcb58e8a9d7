use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};
use trust_dns_resolver::TokioAsyncResolver;

use super::{DnsError, MxRecord};
use super::types::Destination;

/// Builds a resolver from the host's DNS configuration.
pub(crate) fn system_resolver() -> Result<TokioAsyncResolver, trust_dns_resolver::error::ResolveError>
{
    TokioAsyncResolver::tokio_from_system_conf()
}

/// Resolves the mail destination of `ascii_domain`.
///
/// MX records are preferred. When none are usable the domain's address
/// records decide between [`Destination::AddressOnly`] and
/// [`Destination::Missing`]. Both lookups share one deadline.
pub(crate) async fn resolve_destination<R>(
    resolver: &R,
    ascii_domain: &str,
    lookup_timeout: Duration,
) -> Destination
where
    R: LookupMx,
{
    let deadline = Instant::now() + lookup_timeout;

    let mx = timeout_at(deadline, resolver.lookup_mx(ascii_domain))
        .await
        .unwrap_or_else(|_| Err(DnsError::timed_out(ascii_domain)));

    match mx {
        Ok(records) => {
            let records = collect_exchangers(records);
            if !records.is_empty() {
                debug!(domain = ascii_domain, count = records.len(), "MX records resolved");
                return Destination::Exchangers(records);
            }
            debug!(domain = ascii_domain, "no usable MX records, checking address records");
        }
        Err(err) if err.is_timeout() => {
            warn!(domain = ascii_domain, "MX lookup timed out");
            return Destination::TimedOut;
        }
        Err(err) => {
            debug!(domain = ascii_domain, error = %err, "MX lookup failed, checking address records");
        }
    }

    let address = timeout_at(deadline, resolver.has_address(ascii_domain))
        .await
        .unwrap_or_else(|_| Err(DnsError::timed_out(ascii_domain)));

    match address {
        Ok(true) => Destination::AddressOnly,
        Ok(false) => Destination::Missing,
        Err(err) if err.is_timeout() => {
            warn!(domain = ascii_domain, "address lookup timed out");
            Destination::TimedOut
        }
        Err(err) => {
            debug!(domain = ascii_domain, error = %err, "address lookup failed");
            Destination::Missing
        }
    }
}

/// Sorts by preference, removes duplicates and null MX entries (`.`).
pub(crate) fn collect_exchangers(mut records: Vec<MxRecord>) -> Vec<MxRecord> {
    records.retain(|record| !record.exchange.is_empty());
    records.sort();
    records.dedup();
    records
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;

    /// Whether `domain` has at least one A or AAAA record. A negative answer
    /// is `Ok(false)`, not an error.
    async fn has_address(&self, domain: &str) -> Result<bool, DnsError>;
}

impl LookupMx for TokioAsyncResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = self
            .mx_lookup(domain)
            .await
            .map_err(|err| DnsError::from_resolve(domain, err))?;
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }

    async fn has_address(&self, domain: &str) -> Result<bool, DnsError> {
        match self.lookup_ip(domain).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(err) => match DnsError::from_resolve(domain, err) {
                DnsError::NotFound { .. } => Ok(false),
                other => Err(other),
            },
        }
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.on_mx)(domain)
    }

    async fn has_address(&self, domain: &str) -> Result<bool, DnsError> {
        (self.on_address)(domain)
    }
}
