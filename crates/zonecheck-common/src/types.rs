use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest domain name accepted by the API, in characters.
pub const MAX_DOMAIN_LEN: usize = 255;

/// Reasons a requested domain is rejected before any check runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("domain must not be empty")]
    Empty,
    #[error("domain must be at most {max} characters (got {len})")]
    TooLong { len: usize, max: usize },
}

/// Checks the length bounds of a domain (1..=255 characters).
///
/// # Examples
///
/// ```
/// use zonecheck_common::types::{validate_domain, DomainError};
///
/// assert!(validate_domain("example.com").is_ok());
/// assert_eq!(validate_domain(""), Err(DomainError::Empty));
/// assert!(validate_domain(&"a".repeat(256)).is_err());
/// ```
pub fn validate_domain(domain: &str) -> Result<(), DomainError> {
    let len = domain.chars().count();
    if len == 0 {
        return Err(DomainError::Empty);
    }
    if len > MAX_DOMAIN_LEN {
        return Err(DomainError::TooLong {
            len,
            max: MAX_DOMAIN_LEN,
        });
    }
    Ok(())
}

/// Body of `POST /api/v1/checks/`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateCheckRequest {
    /// Domain to check (1-255 characters)
    pub domain: String,
}

/// A normalized finding that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFinding {
    pub level: String,
    pub module: String,
    pub tag: String,
    pub message: String,
}

/// One diagnostic entry produced by the analysis engine for a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Finding {
    pub id: i32,
    /// Severity, e.g. INFO / WARNING / ERROR
    pub level: String,
    /// Engine test module, e.g. NAMESERVER
    pub module: String,
    /// Engine message tag
    pub tag: String,
    pub message: String,
}

/// A check together with all of its findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DnsCheck {
    pub id: i32,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<Finding>,
}

/// List-view row: a check with only the number of its findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DnsCheckSummary {
    pub id: i32,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    /// Number of results for this check
    pub results_count: u64,
}
