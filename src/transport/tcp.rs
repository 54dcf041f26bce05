use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, timeout_at, Instant};

use crate::config::TransportConfig;
use crate::transport::LineTransport;

/// Line transport over a TCP stream. Lines are written with `\r\n` and
/// accepted with either `\n` or `\r\n`.
///
/// The idle deadline runs from the last line sent or received, not from the
/// start of each `next_line` call, so a caller that repeatedly cancels and
/// restarts `next_line` cannot push it back.
pub struct TcpLineTransport {
    reader: BufReader<OwnedReadHalf>,
    /// Bytes of the line being assembled. Kept here so `next_line` stays
    /// cancel-safe.
    partial: Vec<u8>,
    writer: Option<OwnedWriteHalf>,
    config: TransportConfig,
    last_activity: Instant,
}

impl TcpLineTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, TransportConfig::default())
    }

    pub fn with_config(stream: TcpStream, config: TransportConfig) -> Self {
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            partial: Vec::new(),
            writer: Some(write),
            config,
            last_activity: Instant::now(),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A, config: TransportConfig) -> anyhow::Result<Self> {
        let stream = timeout(config.io_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", config.io_timeout))??;
        Ok(Self::with_config(stream, config))
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// When `next_line` gives up if the peer stays silent.
    pub fn idle_deadline(&self) -> Instant {
        self.last_activity + self.config.idle_timeout
    }

    fn mark_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Read up to the next `\n`, failing as soon as the line outgrows
    /// `max_line_len` (one extra byte is allowed for a trailing `\r`).
    async fn read_bounded(&mut self) -> anyhow::Result<String> {
        let limit = self.config.max_line_len + 1;
        loop {
            let available = self.reader.fill_buf().await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::ConnectionReset {
                    anyhow::anyhow!("Connection reset by peer")
                } else {
                    anyhow::anyhow!("Read error: {}", e)
                }
            })?;
            if available.is_empty() {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            let (chunk, done) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (end, true),
                None => (available.len(), false),
            };
            if self.partial.len() + chunk > limit {
                self.partial.clear();
                return Err(anyhow::anyhow!(
                    "Line too long: more than {} bytes (max: {})",
                    self.config.max_line_len,
                    self.config.max_line_len
                ));
            }
            self.partial.extend_from_slice(&available[..chunk]);
            self.reader.consume(if done { chunk + 1 } else { chunk });
            if done {
                let mut raw = std::mem::take(&mut self.partial);
                if raw.last() == Some(&b'\r') {
                    raw.pop();
                }
                if raw.len() > self.config.max_line_len {
                    return Err(anyhow::anyhow!(
                        "Line too long: {} bytes (max: {})",
                        raw.len(),
                        self.config.max_line_len
                    ));
                }
                return String::from_utf8(raw).map_err(|_| anyhow::anyhow!("Line is not valid UTF-8"));
            }
        }
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

#[async_trait::async_trait]
impl LineTransport for TcpLineTransport {
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        if line.len() > self.config.max_line_len {
            return Err(anyhow::anyhow!(
                "Line too long: {} bytes (max: {})",
                line.len(),
                self.config.max_line_len
            ));
        }
        let io_timeout = self.config.io_timeout;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Transport is closed"))?;
        let send_op = async {
            writer.write_all(line.as_bytes()).await.map_err(write_error)?;
            writer.write_all(b"\r\n").await.map_err(write_error)?;
            writer.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };
        timeout(io_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", io_timeout))??;
        self.mark_activity();
        Ok(())
    }

    async fn next_line(&mut self) -> anyhow::Result<String> {
        let idle = self.config.idle_timeout;
        let line = timeout_at(self.idle_deadline(), self.read_bounded())
            .await
            .map_err(|_| anyhow::anyhow!("Connection idle timeout exceeded ({:?})", idle))??;
        self.mark_activity();
        Ok(line)
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.shutdown().await.map_err(write_error)?;
        }
        Ok(())
    }
}
