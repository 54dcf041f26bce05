//! Line transports: the byte-stream boundary of the protocol engine.
//!
//! The engine only needs "write one line" and "read the next line", in order
//! and exactly once. Deadlines are a transport concern and surface as
//! ordinary errors from these calls.

/// A bidirectional, ordered stream of text lines.
///
/// `next_line` must be cancel-safe: the session races it against local
/// requests and drops it when a request wins. For the same reason any read
/// deadline belongs to the transport's state, not to a single call.
#[async_trait::async_trait]
pub trait LineTransport: Send {
    /// Write one line; the terminator is added by the transport.
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()>;
    /// Wait for the next line, without its terminator. Fails on disconnect.
    async fn next_line(&mut self) -> anyhow::Result<String>;
    /// Close the outbound direction. Later sends fail.
    async fn close(&mut self) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<T: LineTransport + ?Sized> LineTransport for Box<T> {
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        (**self).send_line(line).await
    }

    async fn next_line(&mut self) -> anyhow::Result<String> {
        (**self).next_line().await
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        (**self).close().await
    }
}

pub mod in_memory;
pub mod tcp;
