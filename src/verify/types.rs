use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Strength of a verdict.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    High,
    Medium,
    Low,
    Invalid,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    /// Exchanger that was probed, or [`DebugInfo::TIMEOUT`] /
    /// [`DebugInfo::NONE`] when no concrete exchanger answered.
    pub mx_record: String,
}

impl DebugInfo {
    pub const TIMEOUT: &'static str = "timeout";
    pub const NONE: &'static str = "none";
}

/// Verdict for one address.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub valid: bool,
    pub confidence: Confidence,
    pub reason: String,
    pub is_catch_all: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub debug: Option<DebugInfo>,
}

impl VerificationResult {
    /// `Invalid` confidence forces `valid = false`; a catch-all flag is only
    /// kept on a valid verdict.
    pub(crate) fn new(
        valid: bool,
        confidence: Confidence,
        reason: impl Into<String>,
        is_catch_all: bool,
    ) -> Self {
        let valid = valid && confidence != Confidence::Invalid;
        Self {
            valid,
            confidence,
            reason: reason.into(),
            is_catch_all: is_catch_all && valid,
            debug: None,
        }
    }

    pub(crate) fn with_debug(mut self, enabled: bool, mx_record: impl Into<String>) -> Self {
        self.debug = enabled.then(|| DebugInfo {
            mx_record: mx_record.into(),
        });
        self
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.valid { "valid" } else { "invalid" };
        write!(f, "{verdict} ({}): {}", self.confidence, self.reason)?;
        if self.is_catch_all {
            f.write_str(" [catch-all]")?;
        }
        if let Some(debug) = &self.debug {
            write!(f, " [mx: {}]", debug.mx_record)?;
        }
        Ok(())
    }
}
