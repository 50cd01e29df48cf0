use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::IntoParams;
use utoipa::ToSchema;

/// Default page size when `limit` is omitted.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Largest `skip`/`limit` the database can bind (SQLite integers are i64).
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of items to skip (default 0)
    #[param(required = false)]
    #[serde(default, deserialize_with = "deserialize_optional_u64")]
    pub skip: Option<u64>,
    /// Page size (default 100, capped by the server's `max_page_limit`)
    #[param(required = false)]
    #[serde(default, deserialize_with = "deserialize_optional_u64")]
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64Input {
    Number(u64),
    Text(String),
}

fn deserialize_optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<U64Input>::deserialize(deserializer)?;
    let number = match value {
        None => return Ok(None),
        Some(U64Input::Number(number)) => number,
        Some(U64Input::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(U64Input::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| DeError::custom(format!("expected a non-negative integer: {e}")))?,
    };
    if number > MAX_PAGE_VALUE {
        return Err(DeError::custom(format!(
            "value {number} exceeds the maximum of {MAX_PAGE_VALUE}"
        )));
    }
    Ok(Some(number))
}

impl PaginationParams {
    pub fn limit(&self, max: u64) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(max)
            .min(MAX_PAGE_VALUE)
    }

    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0).min(MAX_PAGE_VALUE)
    }
}
