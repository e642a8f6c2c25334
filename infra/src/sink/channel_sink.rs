//! Completion sink backed by a tokio mpsc channel

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use kyc_core::{CompletionSink, VerificationRecord};

/// Forwards completed records to whoever holds the receiver
///
/// Delivery fails once the receiver has been dropped, which leaves the
/// submitting session open for a retry.
#[derive(Debug, Clone)]
pub struct ChannelCompletionSink {
    sender: mpsc::Sender<VerificationRecord>,
}

impl ChannelCompletionSink {
    /// Create a sink and the receiver that drains it
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<VerificationRecord>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl CompletionSink for ChannelCompletionSink {
    async fn complete(&self, record: &VerificationRecord) -> Result<(), String> {
        self.sender.send(record.clone()).await.map_err(|_| {
            warn!(record_id = %record.id, event = "completion_channel_closed", "Completion receiver is gone");
            "Completion receiver is no longer listening".to_string()
        })
    }
}
