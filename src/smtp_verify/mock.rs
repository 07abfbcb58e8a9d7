//! Scripted loopback SMTP server for exercising the async probe.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub(crate) struct Script {
    greeting: &'static str,
    steps: Vec<(&'static str, &'static str)>,
    hang_up: bool,
}

impl Script {
    /// Writes `greeting`, then answers each command that starts with the
    /// expected prefix. Whatever arrives afterwards is recorded until EOF.
    pub(crate) fn new(greeting: &'static str, steps: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            greeting,
            steps,
            hang_up: false,
        }
    }

    /// A well-behaved server answering `RCPT TO` with `reply`.
    pub(crate) fn rcpt(reply: &'static str) -> Self {
        Self::new(
            "220 mock.smtp.test ESMTP\r\n",
            vec![
                ("HELO", "250 mock.smtp.test\r\n"),
                ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
                ("RCPT TO:", reply),
            ],
        )
    }

    pub(crate) fn hang_up_after_greeting() -> Self {
        Self {
            greeting: "220 mock.smtp.test ESMTP\r\n",
            steps: Vec::new(),
            hang_up: true,
        }
    }
}

pub(crate) struct MockServer {
    pub port: u16,
    handle: JoinHandle<Vec<Vec<String>>>,
}

impl MockServer {
    /// Accepts one connection per script, in order, then stops listening.
    pub(crate) async fn spawn(scripts: Vec<Script>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let port = listener.local_addr().expect("addr").port();
        let handle = tokio::spawn(async move {
            let mut sessions = Vec::new();
            for script in scripts {
                let (stream, _) = listener.accept().await.expect("accept");
                sessions.push(run_script(stream, script).await);
            }
            sessions
        });
        Self { port, handle }
    }

    /// A loopback port nothing listens on.
    pub(crate) async fn unused_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe port");
        listener.local_addr().expect("addr").port()
    }

    /// Waits for every scripted session; returns the lines each one received.
    pub(crate) async fn finish(self) -> Vec<Vec<String>> {
        self.handle.await.expect("mock server task")
    }
}

async fn run_script(stream: TcpStream, script: Script) -> Vec<String> {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    let mut received = Vec::new();

    write
        .write_all(script.greeting.as_bytes())
        .await
        .expect("write greeting");
    if script.hang_up {
        return received;
    }

    for (expected, reply) in script.steps {
        let mut line = String::new();
        reader.read_line(&mut line).await.expect("read command");
        assert!(
            line.starts_with(expected),
            "expected command starting with '{expected}', got '{line}'"
        );
        received.push(line.trim_end().to_string());
        write.write_all(reply.as_bytes()).await.expect("write reply");
    }

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => received.push(line.trim_end().to_string()),
        }
    }
    received
}
