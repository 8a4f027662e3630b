//! Unit tests for checking submitted codes

use std::sync::Arc;

use super::mocks::{MockCodeStore, MockDeliveryChannel, ReissuingCodeStore};
use crate::errors::DomainError;
use crate::services::verification::{
    CodeCheck, CodeStore, VerificationService, VerificationServiceConfig,
};

fn setup() -> (VerificationService, Arc<MockCodeStore>) {
    let store = Arc::new(MockCodeStore::new(false));
    let delivery = Arc::new(MockDeliveryChannel::new(false));
    let service = VerificationService::with_store(
        delivery,
        store.clone(),
        VerificationServiceConfig::default(),
    );
    (service, store)
}

fn stored_code(store: &MockCodeStore, identity: &str) -> String {
    store
        .entry(&format!("verify_code_{}", identity))
        .map(|(value, _)| value)
        .expect("code stored")
}

#[tokio::test]
async fn test_check_accepts_once() {
    let (service, store) = setup();
    service.issue("a@x.com").await;
    let code = stored_code(&store, "a@x.com");

    assert_eq!(service.check_code("a@x.com", &code).await.unwrap(), CodeCheck::Accepted);
    assert_eq!(service.check_code("a@x.com", &code).await.unwrap(), CodeCheck::NotFound);
}

#[tokio::test]
async fn test_check_mismatch_keeps_record() {
    let (service, store) = setup();
    service.issue("a@x.com").await;
    let code = stored_code(&store, "a@x.com");
    let wrong = if code == "123456" { "654321" } else { "123456" };

    assert_eq!(service.check_code("a@x.com", wrong).await.unwrap(), CodeCheck::Mismatch);
    assert_eq!(service.check_code("a@x.com", "12345").await.unwrap(), CodeCheck::Mismatch);
    assert_eq!(service.check_code("a@x.com", &code).await.unwrap(), CodeCheck::Accepted);
}

#[tokio::test]
async fn test_check_unknown_identity() {
    let (service, _) = setup();
    assert_eq!(service.check_code("nobody@x.com", "123456").await.unwrap(), CodeCheck::NotFound);
}

#[tokio::test]
async fn test_only_latest_code_validates() {
    let (service, store) = setup();
    service.issue("a@x.com").await;
    let first = stored_code(&store, "a@x.com");
    service.issue("a@x.com").await;
    let second = stored_code(&store, "a@x.com");

    if first != second {
        assert_eq!(service.check_code("a@x.com", &first).await.unwrap(), CodeCheck::Mismatch);
    }
    assert_eq!(service.check_code("a@x.com", &second).await.unwrap(), CodeCheck::Accepted);
}

#[tokio::test]
async fn test_check_requires_store() {
    let delivery = Arc::new(MockDeliveryChannel::new(false));
    let service = VerificationService::generation_only(delivery, VerificationServiceConfig::default());

    let result = service.check_code("a@x.com", "123456").await;
    assert!(matches!(result, Err(DomainError::StoreNotConfigured)));
}

#[tokio::test]
async fn test_reissue_during_check_rejects_old_code() {
    let store = Arc::new(ReissuingCodeStore::new("999999"));
    let delivery = Arc::new(MockDeliveryChannel::new(false));
    let service = VerificationService::with_store(
        delivery,
        store.clone(),
        VerificationServiceConfig::default(),
    );
    store.inner.set("verify_code_a@x.com", "111111", 600).await;

    let check = service.check_code("a@x.com", "111111").await.unwrap();

    assert_eq!(check, CodeCheck::NotFound);
    let (current, _) = store.inner.entry("verify_code_a@x.com").expect("newer code kept");
    assert_eq!(current, "999999");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checks_accept_exactly_once() {
    let (service, store) = setup();
    let service = Arc::new(service);
    service.issue("race@x.com").await;
    let code = stored_code(&store, "race@x.com");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            let code = code.clone();
            tokio::spawn(async move { service.check_code("race@x.com", &code).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_accepted() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
}
