/// Errors raised while talking to the analysis engine.
///
/// Every variant except [`EngineError::Client`] means the engine could not
/// deliver results for this request; callers report them all as the same
/// "service unavailable" condition.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The HTTP client could not be constructed (bad TLS backend, etc.).
    #[error("Engine: failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection refused, timeout, DNS failure reaching the endpoint.
    #[error("Failed to connect to Zonemaster API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Zonemaster API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON-RPC response.
    #[error("Zonemaster API returned an invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The JSON-RPC envelope carried an `error` member.
    #[error("Zonemaster API error: {0}")]
    Rpc(serde_json::Value),
}

/// Convenience `Result` alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
