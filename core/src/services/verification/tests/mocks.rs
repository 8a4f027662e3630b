//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::services::verification::traits::{CodeStore, DeliveryChannel};
use crate::services::verification::types::{DeliveryStatus, OutboundMessage};

// Mock delivery channel for testing
pub struct MockDeliveryChannel {
    pub sent_messages: Mutex<Vec<OutboundMessage>>,
    pub send_calls: AtomicUsize,
    pub should_fail: bool,
    pub should_panic: bool,
}

impl MockDeliveryChannel {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Mutex::new(Vec::new()),
            send_calls: AtomicUsize::new(0),
            should_fail,
            should_panic: false,
        }
    }

    pub fn panicking() -> Self {
        Self {
            should_panic: true,
            ..Self::new(false)
        }
    }

    pub fn send_count(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<OutboundMessage> {
        self.sent_messages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DeliveryChannel for MockDeliveryChannel {
    async fn send(&self, message: &OutboundMessage) -> DeliveryStatus {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_panic {
            panic!("mail transport exploded");
        }
        if self.should_fail {
            return DeliveryStatus::Failed {
                reason: "Delivery service error".to_string(),
            };
        }
        self.sent_messages.lock().unwrap().push(message.clone());
        DeliveryStatus::Sent {
            message_id: format!("mock-msg-{}", self.send_count()),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

// Mock code store for testing; keeps (value, ttl) and never expires
pub struct MockCodeStore {
    pub entries: Mutex<HashMap<String, (String, i64)>>,
    pub set_calls: AtomicUsize,
    pub should_fail: bool,
}

impl MockCodeStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            set_calls: AtomicUsize::new(0),
            should_fail,
        }
    }

    pub fn set_count(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn entry(&self, key: &str) -> Option<(String, i64)> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return false;
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        true
    }

    async fn get(&self, key: &str) -> Option<String> {
        if self.should_fail {
            return None;
        }
        self.entries.lock().unwrap().get(key).map(|(value, _)| value.clone())
    }

    async fn exists(&self, key: &str) -> bool {
        if self.should_fail {
            return false;
        }
        self.entries.lock().unwrap().contains_key(key)
    }

    async fn delete(&self, key: &str) -> bool {
        if self.should_fail {
            return false;
        }
        self.entries.lock().unwrap().remove(key).is_some()
    }

    async fn consume(&self, key: &str, expected: &str) -> bool {
        if self.should_fail {
            return false;
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, _)) if value == expected => entries.remove(key).is_some(),
            _ => false,
        }
    }
}

// Code store that lets a newer issuance overwrite the record right after
// each read, to exercise a re-issue landing mid-check
pub struct ReissuingCodeStore {
    pub inner: MockCodeStore,
    pub replacement: String,
}

impl ReissuingCodeStore {
    pub fn new(replacement: &str) -> Self {
        Self {
            inner: MockCodeStore::new(false),
            replacement: replacement.to_string(),
        }
    }
}

#[async_trait]
impl CodeStore for ReissuingCodeStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn get(&self, key: &str) -> Option<String> {
        let value = self.inner.get(key).await;
        self.inner.set(key, &self.replacement, 600).await;
        value
    }

    async fn exists(&self, key: &str) -> bool {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> bool {
        self.inner.delete(key).await
    }

    async fn consume(&self, key: &str, expected: &str) -> bool {
        self.inner.consume(key, expected).await
    }
}
