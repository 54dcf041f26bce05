use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::transport::LineTransport;

/// One end of an in-process line pipe.
pub struct InMemoryTransport {
    incoming: UnboundedReceiver<String>,
    outgoing: Option<UnboundedSender<String>>,
}

impl InMemoryTransport {
    /// Two connected endpoints: what one sends, the other receives.
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = unbounded_channel();
        let (tx2, rx2) = unbounded_channel();
        (
            Self {
                incoming: rx1,
                outgoing: Some(tx2),
            },
            Self {
                incoming: rx2,
                outgoing: Some(tx1),
            },
        )
    }
}

#[async_trait::async_trait]
impl LineTransport for InMemoryTransport {
    async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        let tx = self
            .outgoing
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Transport is closed"))?;
        tx.send(line.to_string())
            .map_err(|_| anyhow::anyhow!("Connection closed by peer"))
    }

    async fn next_line(&mut self) -> anyhow::Result<String> {
        self.incoming
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Connection closed by peer"))
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.outgoing = None;
        Ok(())
    }
}
