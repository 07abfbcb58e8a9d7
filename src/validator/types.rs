use thiserror::Error;

/// An address split on its `@` separator, with the domain normalised.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParts {
    pub local: String,
    /// Trimmed, lower-cased domain as written by the caller.
    pub domain: String,
    /// ASCII (punycode) form of `domain`, used for DNS queries and the SMTP
    /// envelope. Equal to `domain` when IDNA conversion is not applicable.
    pub ascii_domain: String,
}

impl EmailParts {
    /// Address used in the `RCPT TO` envelope.
    pub fn recipient(&self) -> String {
        format!("{}@{}", self.local, self.ascii_domain)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("missing '@' separator")]
    MissingSeparator,
    #[error("more than one '@' separator")]
    MultipleSeparators,
    #[error("domain is empty")]
    EmptyDomain,
}
