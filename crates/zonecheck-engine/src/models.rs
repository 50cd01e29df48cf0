use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const START_DOMAIN_TEST: &str = "start_domain_test";
pub const DEFAULT_PROFILE: &str = "default";
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u64,
}

/// Parameters of `start_domain_test`
#[derive(Debug, Clone, Serialize)]
pub struct DomainTestParams<'a> {
    pub domain: &'a str,
    pub profile: &'a str,
}

impl<'a> RpcRequest<'a, DomainTestParams<'a>> {
    pub fn start_domain_test(domain: &'a str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: START_DOMAIN_TEST,
            params: DomainTestParams {
                domain,
                profile: DEFAULT_PROFILE,
            },
            id: REQUEST_ID,
        }
    }
}

/// JSON-RPC 2.0 response envelope. `null` members are treated as absent,
/// including `error`: only a non-null `error` marks the call as failed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Result entries of a successful call.
    ///
    /// A missing result is an empty list; a scalar or object result is
    /// passed on as a single entry.
    pub fn into_entries(self) -> Vec<Value> {
        match self.result {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
        }
    }
}
