use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config/server.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Verbose logging, including every SQL statement
    #[serde(default)]
    pub debug: bool,
    /// Allowed CORS origins; empty or containing "*" allows any origin
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound applied to the `limit` query parameter of list endpoints
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u64,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl DatabaseConfig {
    /// Connection URL with any password replaced by `***`, for logs.
    pub fn redacted_url(&self) -> String {
        let Some(scheme_end) = self.url.find("://") else {
            return self.url.clone();
        };
        let rest = &self.url[scheme_end + 3..];
        let Some(at) = rest.find('@') else {
            return self.url.clone();
        };
        match rest[..at].find(':') {
            Some(colon) => format!(
                "{}{}:***{}",
                &self.url[..scheme_end + 3],
                &rest[..colon],
                &rest[at..]
            ),
            None => self.url.clone(),
        }
    }
}

/// Downstream Zonemaster JSON-RPC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    #[serde(default = "default_engine_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            timeout_secs: default_engine_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            http_port: default_http_port(),
            debug: false,
            cors_allowed_origins: Vec::new(),
            max_page_limit: default_max_page_limit(),
            database: DatabaseConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

fn default_project_name() -> String {
    "zonecheck".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_max_page_limit() -> u64 {
    1000
}

fn default_database_url() -> String {
    "sqlite://zonecheck.db?mode=rwc".to_string()
}

fn default_engine_url() -> String {
    "http://localhost:8080/RPC2".to_string()
}

fn default_engine_timeout_secs() -> u64 {
    zonecheck_engine::DEFAULT_TIMEOUT_SECS
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("{key}: expected a boolean, got '{other}'"),
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` if given (it must exist), otherwise the default config
    /// file when present, otherwise built-in defaults. Environment overrides
    /// are applied last.
    pub fn load_with_env(path: Option<&str>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)
                .map_err(|e| anyhow::anyhow!("Failed to load config '{}': {}", p, e))?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides settings from environment-style variables looked up
    /// through `get`.
    pub fn apply_env<F>(&mut self, get: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("ZONEMASTER_API_URL") {
            self.engine.url = v;
        }
        if let Some(v) = get("ZONEMASTER_API_TIMEOUT") {
            self.engine.timeout_secs = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("ZONEMASTER_API_TIMEOUT: {e}"))?;
        }
        if let Some(v) = get("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = get("DEBUG") {
            self.debug = parse_bool("DEBUG", &v)?;
        }
        if let Some(v) = get("BACKEND_CORS_ORIGINS") {
            self.cors_allowed_origins = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = get("HTTP_PORT") {
            self.http_port = v
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("HTTP_PORT: {e}"))?;
        }
        Ok(())
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty() || self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.engine.url, "http://localhost:8080/RPC2");
        assert_eq!(config.engine.timeout_secs, 300);
        assert_eq!(config.max_page_limit, 1000);
        assert!(!config.debug);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn file_sections_are_read() {
        let config: ServerConfig = toml::from_str(
            r#"
            http_port = 9000
            cors_allowed_origins = ["http://localhost:3000"]

            [database]
            url = "sqlite://data/checks.db?mode=rwc"

            [engine]
            url = "http://zonemaster:5000/"
            timeout_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.database.url, "sqlite://data/checks.db?mode=rwc");
        assert_eq!(config.engine.timeout_secs, 60);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("ZONEMASTER_API_URL", "http://engine/RPC2"),
            ("ZONEMASTER_API_TIMEOUT", "12"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DEBUG", "true"),
            ("BACKEND_CORS_ORIGINS", "http://a.test, http://b.test"),
        ]
        .into_iter()
        .collect();

        let mut config = ServerConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.engine.url, "http://engine/RPC2");
        assert_eq!(config.engine.timeout_secs, 12);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(config.debug);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn bad_env_value_is_rejected() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(|k| (k == "ZONEMASTER_API_TIMEOUT").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("ZONEMASTER_API_TIMEOUT"));
    }

    #[test]
    fn redacted_url_hides_password() {
        let db = DatabaseConfig {
            url: "postgres://app:s3cret@db:5432/checks".to_string(),
        };
        assert_eq!(db.redacted_url(), "postgres://app:***@db:5432/checks");
        assert_eq!(
            DatabaseConfig::default().redacted_url(),
            "sqlite://zonecheck.db?mode=rwc"
        );
    }
}
