//! HTTP-style response envelopes, byte-compatible with the original
//! handlers: `body` is itself a JSON-encoded string.

use serde::Serialize;
use serde_json::json;

use catapult_engine::ResultSet;

/// The only two shapes the proxy ever emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ResponseEnvelope {
    /// 200 envelope wrapping the fetched result set.
    pub fn success(result_set: &ResultSet) -> Self {
        Self {
            status_code: 200,
            body: json!({ "ResultSet": result_set }).to_string(),
        }
    }

    /// 500 envelope with the flattened legacy error shape. `data` is always
    /// empty; no partial results accompany a failure.
    pub fn failure(detail: &str) -> Self {
        Self {
            status_code: 500,
            body: json!({
                "status": "error",
                "message": format!("Error executing query: {detail}"),
                "data": [],
            })
            .to_string(),
        }
    }
}
