use thiserror::Error;

/// Failure during an SMTP dialogue. These never reach the caller of
/// [`crate::verify`]: malformed replies become a rejection, everything else
/// a connection-failure outcome.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("connection closed by server")]
    Closed,
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

impl SessionError {
    pub(crate) fn connect(host: impl Into<String>, port: u16, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.into(),
            port,
            source,
        }
    }

    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub(crate) fn malformed(line: impl Into<String>) -> Self {
        Self::MalformedReply(line.into())
    }
}
