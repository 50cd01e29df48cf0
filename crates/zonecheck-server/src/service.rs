use std::sync::Arc;
use zonecheck_common::types::{validate_domain, DnsCheck, DnsCheckSummary};
use zonecheck_engine::{normalize_findings, DomainAnalyzer};
use zonecheck_storage::{CheckStore, StorageError};

use crate::error::{CheckFailure, ServiceError};

/// Runs DNS checks against the analysis engine and serves stored results.
pub struct CheckService {
    store: Arc<CheckStore>,
    analyzer: Arc<dyn DomainAnalyzer>,
}

impl CheckService {
    pub fn new(store: Arc<CheckStore>, analyzer: Arc<dyn DomainAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Creates a check for `domain`, runs the engine, stores its findings and
    /// returns the check with every finding attached.
    ///
    /// Either the full view is returned or the whole run fails with
    /// [`ServiceError::CheckFailed`]. A check whose engine call or finding
    /// insert failed is deleted again, so no results-less check is left
    /// behind.
    pub async fn run_check_and_save(&self, domain: &str) -> Result<DnsCheck, ServiceError> {
        validate_domain(domain)?;
        self.run(domain).await.map_err(ServiceError::CheckFailed)
    }

    async fn run(&self, domain: &str) -> Result<DnsCheck, CheckFailure> {
        let check = self.store.create_check(domain).await?;
        tracing::info!(
            check_id = check.id,
            domain,
            engine = %self.analyzer.endpoint(),
            "Starting DNS check"
        );

        let raw = match self.analyzer.analyze(domain).await {
            Ok(raw) => raw,
            Err(e) => {
                self.discard(check.id).await;
                return Err(e.into());
            }
        };

        let findings = normalize_findings(&raw);
        if let Err(e) = self.store.insert_findings(check.id, &findings).await {
            self.discard(check.id).await;
            return Err(e.into());
        }

        let stored = self
            .store
            .get_check(check.id)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "dns_check",
                id: check.id,
            })?;

        tracing::info!(
            check_id = stored.id,
            domain,
            results = stored.results.len(),
            "DNS check completed"
        );
        Ok(stored)
    }

    /// Compensating delete for a check whose run failed.
    async fn discard(&self, check_id: i32) {
        match self.store.delete_check(check_id).await {
            Ok(_) => tracing::debug!(check_id, "Discarded failed check"),
            Err(e) => tracing::warn!(check_id, error = %e, "Failed to discard failed check"),
        }
    }

    pub async fn get_check(&self, id: i32) -> Result<DnsCheck, ServiceError> {
        self.store.get_check(id).await?.ok_or(ServiceError::NotFound)
    }

    pub async fn list_checks(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<DnsCheckSummary>, ServiceError> {
        Ok(self.store.list_checks_with_count(skip, limit).await?)
    }
}
