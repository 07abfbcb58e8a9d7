use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::smtp_verify::SmtpProbeOptions;

/// Configuration for [`verify_with_options`](crate::verify_with_options).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Attach [`DebugInfo`](crate::DebugInfo) to every result.
    pub debug: bool,
    /// Bound on MX plus address-record resolution.
    pub dns_timeout_ms: u64,
    /// Exchangers tried, in preference order, when connections fail.
    pub max_mx: usize,
    /// Run the synthetic-recipient probe after an acceptance.
    pub catch_all: bool,
    pub probe: SmtpProbeOptions,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            debug: false,
            dns_timeout_ms: 5_000,
            max_mx: 1,
            catch_all: true,
            probe: SmtpProbeOptions::default(),
        }
    }
}

impl VerifyOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }
}
