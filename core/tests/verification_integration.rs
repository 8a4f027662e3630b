//! Integration tests for the verification service against an expiring store

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::RwLock;
    use tokio::time::Instant;

    use vm_core::errors::ErrorKind;
    use vm_core::services::verification::{
        CodeCheck, CodeStore, DeliveryChannel, DeliveryStatus, OutboundMessage,
        VerificationService, VerificationServiceConfig,
    };

    // Inbox that keeps every message it was handed
    struct RecordingInbox {
        messages: RwLock<Vec<OutboundMessage>>,
        counter: AtomicUsize,
    }

    impl RecordingInbox {
        fn new() -> Self {
            Self {
                messages: RwLock::new(Vec::new()),
                counter: AtomicUsize::new(0),
            }
        }

        // Pull the 6-digit code out of the last message sent to `to`
        async fn last_code_for(&self, to: &str) -> Option<String> {
            let messages = self.messages.read().await;
            let message = messages.iter().rev().find(|m| m.to == to)?;
            message
                .text_body
                .split(|c: char| !c.is_ascii_digit())
                .find(|word| word.len() == 6)
                .map(str::to_string)
        }
    }

    #[async_trait]
    impl DeliveryChannel for RecordingInbox {
        async fn send(&self, message: &OutboundMessage) -> DeliveryStatus {
            let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            self.messages.write().await.push(message.clone());
            DeliveryStatus::Sent {
                message_id: format!("inbox-{}", id),
            }
        }

        fn provider_name(&self) -> &str {
            "Inbox"
        }
    }

    // Store honouring TTLs against the tokio clock
    struct ExpiringStore {
        entries: RwLock<HashMap<String, (String, Instant)>>,
    }

    impl ExpiringStore {
        fn new() -> Self {
            Self {
                entries: RwLock::new(HashMap::new()),
            }
        }

        async fn live(&self, key: &str) -> Option<String> {
            let entries = self.entries.read().await;
            entries
                .get(key)
                .filter(|(_, expires_at)| Instant::now() < *expires_at)
                .map(|(value, _)| value.clone())
        }
    }

    #[async_trait]
    impl CodeStore for ExpiringStore {
        async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
            let expires_at = Instant::now() + Duration::from_secs(ttl_seconds.max(0) as u64);
            self.entries
                .write()
                .await
                .insert(key.to_string(), (value.to_string(), expires_at));
            true
        }

        async fn get(&self, key: &str) -> Option<String> {
            self.live(key).await
        }

        async fn exists(&self, key: &str) -> bool {
            self.live(key).await.is_some()
        }

        async fn delete(&self, key: &str) -> bool {
            let mut entries = self.entries.write().await;
            match entries.remove(key) {
                Some((_, expires_at)) => Instant::now() < expires_at,
                None => false,
            }
        }

        async fn consume(&self, key: &str, expected: &str) -> bool {
            let mut entries = self.entries.write().await;
            let matches = entries
                .get(key)
                .is_some_and(|(value, expires_at)| value == expected && Instant::now() < *expires_at);
            if matches {
                entries.remove(key);
            }
            matches
        }
    }

    fn create_service() -> (VerificationService, Arc<RecordingInbox>, Arc<ExpiringStore>) {
        let inbox = Arc::new(RecordingInbox::new());
        let store = Arc::new(ExpiringStore::new());
        let service = VerificationService::with_store(
            inbox.clone(),
            store.clone(),
            VerificationServiceConfig::default(),
        );
        (service, inbox, store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivered_code_validates_within_ttl() {
        let (service, inbox, _) = create_service();

        let result = service.issue("user@example.com").await;
        assert_eq!(result.error, ErrorKind::Success);

        let code = inbox.last_code_for("user@example.com").await.unwrap();
        tokio::time::advance(Duration::from_secs(599)).await;

        let check = service.check_code("user@example.com", &code).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_code_expires_after_ttl() {
        let (service, inbox, store) = create_service();

        service.issue("late@example.com").await;
        let code = inbox.last_code_for("late@example.com").await.unwrap();
        assert!(store.exists("verify_code_late@example.com").await);

        tokio::time::advance(Duration::from_secs(601)).await;

        assert!(!store.exists("verify_code_late@example.com").await);
        let check = service.check_code("late@example.com", &code).await.unwrap();
        assert_eq!(check, CodeCheck::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reissue_resets_ttl() {
        let (service, inbox, _) = create_service();

        service.issue("again@example.com").await;
        tokio::time::advance(Duration::from_secs(500)).await;
        service.issue("again@example.com").await;
        let code = inbox.last_code_for("again@example.com").await.unwrap();

        // 700s after the first issuance, 200s after the second
        tokio::time::advance(Duration::from_secs(200)).await;

        let check = service.check_code("again@example.com", &code).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted);
    }

    #[tokio::test]
    async fn test_identities_are_isolated() {
        let (service, inbox, _) = create_service();

        service.issue("one@example.com").await;
        service.issue("two@example.com").await;
        let code_one = inbox.last_code_for("one@example.com").await.unwrap();
        let code_two = inbox.last_code_for("two@example.com").await.unwrap();

        if code_one != code_two {
            let check = service.check_code("two@example.com", &code_one).await.unwrap();
            assert_eq!(check, CodeCheck::Mismatch);
        }
        let check = service.check_code("one@example.com", &code_one).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted);
        let check = service.check_code("two@example.com", &code_two).await.unwrap();
        assert_eq!(check, CodeCheck::Accepted);
    }
}
