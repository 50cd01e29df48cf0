use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_initial_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // dns_results references dns_checks, so parents first
        manager.get_connection().execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DOWN_SQL)
            .await?;
        Ok(())
    }
}

const UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS dns_checks (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    domain VARCHAR(255) NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_dns_checks_domain ON dns_checks(domain);
CREATE INDEX IF NOT EXISTS idx_dns_checks_created_at ON dns_checks(created_at DESC);

CREATE TABLE IF NOT EXISTS dns_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    dns_check_id INTEGER NOT NULL REFERENCES dns_checks(id) ON DELETE CASCADE,
    level VARCHAR(50) NOT NULL,
    module VARCHAR(100) NOT NULL,
    tag VARCHAR(100) NOT NULL,
    message TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_dns_results_check_id ON dns_results(dns_check_id);
CREATE INDEX IF NOT EXISTS idx_dns_results_level ON dns_results(level);
CREATE INDEX IF NOT EXISTS idx_dns_results_module ON dns_results(module);
CREATE INDEX IF NOT EXISTS idx_dns_results_tag ON dns_results(tag);
";

const DOWN_SQL: &str = "
DROP TABLE IF EXISTS dns_results;
DROP TABLE IF EXISTS dns_checks;
";
