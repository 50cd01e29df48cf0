use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use zonecheck_engine::{DomainAnalyzer, EngineError};
use zonecheck_server::error::ServiceError;
use zonecheck_server::service::CheckService;
use zonecheck_storage::CheckStore;

/// Analyzer double returning a fixed answer and counting calls.
struct StubAnalyzer {
    answer: Option<Vec<Value>>,
    calls: AtomicUsize,
}

impl StubAnalyzer {
    fn ok(entries: Vec<Value>) -> Self {
        Self {
            answer: Some(entries),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DomainAnalyzer for StubAnalyzer {
    fn endpoint(&self) -> &str {
        "stub://engine"
    }

    async fn analyze(&self, _domain: &str) -> zonecheck_engine::Result<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Some(entries) => Ok(entries.clone()),
            None => Err(EngineError::Rpc(json!({"code": -1, "message": "engine down"}))),
        }
    }
}

async fn service_with(
    analyzer: Arc<StubAnalyzer>,
) -> (tempfile::TempDir, Arc<CheckStore>, CheckService) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("svc.db").display());
    let store = Arc::new(CheckStore::new(&url, false).await.expect("store should open"));
    let service = CheckService::new(store.clone(), analyzer);
    (dir, store, service)
}

#[tokio::test]
async fn findings_keep_engine_order() {
    let analyzer = Arc::new(StubAnalyzer::ok(vec![
        json!({"level": "ERROR", "module": "A", "tag": "T1", "message": "first"}),
        json!({"level": "NOTICE", "module": "B", "tag": "T2", "message": "second"}),
        json!({"level": "INFO", "module": "C", "tag": "T3", "message": "third"}),
    ]));
    let (_dir, store, service) = service_with(analyzer.clone()).await;

    let check = service.run_check_and_save("order.example").await.unwrap();
    let messages: Vec<&str> = check.results.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert!(check.results.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(store.count_findings(check.id).await.unwrap(), 3);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_analysis_is_compensated() {
    let analyzer = Arc::new(StubAnalyzer::failing());
    let (_dir, store, service) = service_with(analyzer.clone()).await;

    let err = service.run_check_and_save("down.example").await.unwrap_err();
    assert!(matches!(err, ServiceError::CheckFailed(_)));
    assert!(err.to_string().starts_with("DNS check failed: "));
    assert!(err.to_string().contains("engine down"));
    assert_eq!(store.count_checks().await.unwrap(), 0);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_domain_never_reaches_analyzer() {
    let analyzer = Arc::new(StubAnalyzer::ok(vec![]));
    let (_dir, store, service) = service_with(analyzer.clone()).await;

    let err = service.run_check_and_save("").await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationFailed(_)));
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.count_checks().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_check_is_not_found() {
    let analyzer = Arc::new(StubAnalyzer::ok(vec![]));
    let (_dir, _store, service) = service_with(analyzer).await;

    let err = service.get_check(404).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn list_counts_match_findings() {
    let analyzer = Arc::new(StubAnalyzer::ok(vec![
        json!({"tag": "X"}),
        json!({"tag": "Y"}),
    ]));
    let (_dir, _store, service) = service_with(analyzer).await;

    let first = service.run_check_and_save("one.example").await.unwrap();
    let second = service.run_check_and_save("two.example").await.unwrap();

    let summaries = service.list_checks(0, 100).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, second.id);
    assert_eq!(summaries[1].id, first.id);
    assert!(summaries.iter().all(|s| s.results_count == 2));
}

#[tokio::test]
async fn large_engine_answer_keeps_every_finding() {
    let entries: Vec<Value> = (0..7000)
        .map(|n| json!({"level": "INFO", "module": "BULK", "tag": format!("T{n:04}")}))
        .collect();
    let analyzer = Arc::new(StubAnalyzer::ok(entries));
    let (_dir, store, service) = service_with(analyzer).await;

    let check = service.run_check_and_save("big.example").await.unwrap();
    assert_eq!(check.results.len(), 7000);
    assert_eq!(check.results[0].tag, "T0000");
    assert_eq!(check.results[6999].tag, "T6999");
    assert_eq!(store.count_findings(check.id).await.unwrap(), 7000);
}
