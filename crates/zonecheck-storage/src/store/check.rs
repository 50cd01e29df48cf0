use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use zonecheck_common::types::{DnsCheck, DnsCheckSummary, Finding, NewFinding};

use crate::entities::dns_check::{self, Column as CheckCol, Entity as CheckEntity};
use crate::entities::dns_result::{self, Column as ResultCol, Entity as ResultEntity};
use crate::error::Result;
use crate::store::CheckStore;

/// Rows per `INSERT` statement. Each row binds five parameters and SQLite
/// caps a statement at 32766 variables.
pub const FINDINGS_PER_INSERT: usize = 1000;

/// SQLite binds integers as i64.
const MAX_BIND_U64: u64 = i64::MAX as u64;

/// Row shape of the list query: check columns plus an aggregated count.
#[derive(Debug, FromQueryResult)]
struct CheckSummaryRow {
    id: i32,
    domain: String,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    results_count: i64,
}

fn model_to_finding(m: dns_result::Model) -> Finding {
    Finding {
        id: m.id,
        level: m.level,
        module: m.module,
        tag: m.tag,
        message: m.message,
    }
}

fn model_to_check(m: dns_check::Model, results: Vec<dns_result::Model>) -> DnsCheck {
    DnsCheck {
        id: m.id,
        domain: m.domain,
        created_at: m.created_at.with_timezone(&Utc),
        results: results.into_iter().map(model_to_finding).collect(),
    }
}

impl CheckStore {
    /// Inserts a check carrying only its domain. The id and the UTC
    /// `created_at` timestamp are assigned by the store at insert time; the
    /// returned view has no results yet.
    pub async fn create_check(&self, domain: &str) -> Result<DnsCheck> {
        let am = dns_check::ActiveModel {
            domain: Set(domain.to_owned()),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        let model = am.insert(self.db()).await?;
        tracing::debug!(check_id = model.id, domain = %model.domain, "Check created");
        Ok(model_to_check(model, Vec::new()))
    }

    /// Persists a batch of findings for `check_id` in one transaction,
    /// keeping the order of `findings`. Large batches are split into
    /// multi-row inserts of [`FINDINGS_PER_INSERT`] rows. Returns the number
    /// of rows written.
    pub async fn insert_findings(&self, check_id: i32, findings: &[NewFinding]) -> Result<u64> {
        if findings.is_empty() {
            return Ok(0);
        }

        let txn = self.db().begin().await?;
        for chunk in findings.chunks(FINDINGS_PER_INSERT) {
            let models = chunk.iter().map(|f| dns_result::ActiveModel {
                dns_check_id: Set(check_id),
                level: Set(f.level.clone()),
                module: Set(f.module.clone()),
                tag: Set(f.tag.clone()),
                message: Set(f.message.clone()),
                ..Default::default()
            });
            ResultEntity::insert_many(models).exec(&txn).await?;
        }
        txn.commit().await?;

        tracing::debug!(check_id, count = findings.len(), "Findings inserted");
        Ok(findings.len() as u64)
    }

    /// Loads a check with all of its findings, ordered by insertion.
    pub async fn get_check(&self, id: i32) -> Result<Option<DnsCheck>> {
        let Some(model) = CheckEntity::find_by_id(id).one(self.db()).await? else {
            return Ok(None);
        };
        let results = ResultEntity::find()
            .filter(ResultCol::DnsCheckId.eq(id))
            .order_by_asc(ResultCol::Id)
            .all(self.db())
            .await?;
        Ok(Some(model_to_check(model, results)))
    }

    /// Newest-first page of checks, each with the number of its findings.
    ///
    /// The count comes from a LEFT JOIN aggregate, so finding rows are never
    /// loaded. Checks created within the same instant are ordered by id.
    pub async fn list_checks_with_count(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<DnsCheckSummary>> {
        let rows = CheckEntity::find()
            .select_only()
            .column(CheckCol::Id)
            .column(CheckCol::Domain)
            .column(CheckCol::CreatedAt)
            .column_as(
                Expr::col((ResultEntity, ResultCol::Id)).count(),
                "results_count",
            )
            .join(JoinType::LeftJoin, dns_check::Relation::Results.def())
            .group_by(CheckCol::Id)
            .group_by(CheckCol::Domain)
            .group_by(CheckCol::CreatedAt)
            .order_by_desc(CheckCol::CreatedAt)
            .order_by_desc(CheckCol::Id)
            .offset(skip.min(MAX_BIND_U64))
            .limit(limit.min(MAX_BIND_U64))
            .into_model::<CheckSummaryRow>()
            .all(self.db())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| DnsCheckSummary {
                id: r.id,
                domain: r.domain,
                created_at: r.created_at.with_timezone(&Utc),
                results_count: r.results_count.max(0) as u64,
            })
            .collect())
    }

    /// Deletes a check and every finding attached to it.
    /// Returns `false` when no such check exists.
    pub async fn delete_check(&self, id: i32) -> Result<bool> {
        let txn = self.db().begin().await?;
        ResultEntity::delete_many()
            .filter(ResultCol::DnsCheckId.eq(id))
            .exec(&txn)
            .await?;
        let res = CheckEntity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn count_checks(&self) -> Result<u64> {
        Ok(CheckEntity::find().count(self.db()).await?)
    }

    pub async fn count_findings(&self, check_id: i32) -> Result<u64> {
        Ok(ResultEntity::find()
            .filter(ResultCol::DnsCheckId.eq(check_id))
            .count(self.db())
            .await?)
    }
}
