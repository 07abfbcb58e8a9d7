use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use super::error::SessionError;

/// A plaintext SMTP connection to one mail exchanger.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    read_buf: [u8; 512],
}

impl SmtpSession {
    pub(crate) async fn connect(host: &str, port: u16) -> Result<Self, SessionError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|err| SessionError::connect(host, port, err))?;
        debug!(host, port, "connected");
        Ok(Self {
            host: host.to_string(),
            stream,
            read_buf: [0u8; 512],
        })
    }

    /// Waits for the next bytes from the server. A closed connection is an
    /// error: every stage of the dialogue expects a reply.
    pub(crate) async fn read_chunk(&mut self) -> Result<&[u8], SessionError> {
        let read = self
            .stream
            .read(&mut self.read_buf)
            .await
            .map_err(SessionError::io)?;
        if read == 0 {
            return Err(SessionError::Closed);
        }
        Ok(&self.read_buf[..read])
    }

    pub(crate) async fn send_command(&mut self, command: &str) -> Result<(), SessionError> {
        debug!(host = %self.host, "C: {command}");
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data).await.map_err(SessionError::io)?;
        self.stream.flush().await.map_err(SessionError::io)
    }

    /// Sends `QUIT` and closes the write side without waiting for the
    /// server's `221`. Failures are ignored.
    pub(crate) async fn quit(mut self) {
        if let Err(err) = self.send_command("QUIT").await {
            debug!(host = %self.host, error = %err, "QUIT not delivered");
        }
        let _ = self.stream.shutdown().await;
    }
}
