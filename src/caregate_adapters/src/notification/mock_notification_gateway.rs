use std::sync::Arc;

use tokio::sync::RwLock;

use caregate_core::{Email, NotificationGateway, OtpCode};

/// Gateway that records instead of sending. Clones share the recorded
/// deliveries, so a test can hold one handle and hand another to the
/// service under test.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationGateway {
    sent: Arc<RwLock<Vec<(Email, OtpCode)>>>,
}

impl MockNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_code(&self) -> Option<OtpCode> {
        let sent = self.sent.read().await;
        sent.last().map(|(_, code)| code.clone())
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait::async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn send_two_factor_code(&self, recipient: &Email, code: &OtpCode) -> Result<(), String> {
        let mut sent = self.sent.write().await;
        sent.push((recipient.clone(), code.clone()));
        Ok(())
    }
}
