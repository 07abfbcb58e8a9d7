/// A mail exchanger published for a domain. Lower `preference` is tried
/// first.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Where mail for a domain would go, as far as DNS can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Destination {
    /// MX records, sorted by ascending preference.
    Exchangers(Vec<MxRecord>),
    /// No usable MX records, but the domain has address records.
    AddressOnly,
    /// Neither MX nor address records.
    Missing,
    /// A lookup did not finish within the DNS timeout.
    TimedOut,
}

impl Destination {
    #[cfg(test)]
    pub(crate) fn exchangers(&self) -> &[MxRecord] {
        match self {
            Self::Exchangers(records) => records.as_slice(),
            _ => &[],
        }
    }
}
