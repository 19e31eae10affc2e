//! Inbound payload resolution.
//!
//! The proxy accepts three equivalent request shapes inherited from the
//! original function invocations: a mapping carrying `sql_query`, a
//! Lambda-style mapping with the query nested under `body`, or a bare
//! string payload.

use serde_json::Value;

use crate::error::ProxyError;

/// Resolve the SQL text from an inbound payload.
///
/// Resolution order, first match wins:
/// 1. mapping with a `sql_query` field;
/// 2. mapping with a `body` field (JSON string or mapping) carrying
///    `sql_query`;
/// 3. string payload: JSON document with `sql_query` when it parses to a
///    mapping, otherwise the string itself is the SQL.
///
/// Anything that leaves no non-empty SQL string is a validation failure.
pub fn resolve_sql(payload: &Value) -> Result<String, ProxyError> {
    let sql = match payload {
        Value::Object(map) => {
            if let Some(sql) = map.get("sql_query").and_then(Value::as_str) {
                Some(sql.to_string())
            } else if let Some(body) = map.get("body") {
                sql_from_body(body)
            } else {
                None
            }
        }
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ Value::Object(_)) => parsed
                .get("sql_query")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => Some(raw.clone()),
        },
        _ => None,
    };

    match sql {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ProxyError::NoQuery),
    }
}

fn sql_from_body(body: &Value) -> Option<String> {
    match body {
        Value::String(raw) => {
            let parsed: Value = serde_json::from_str(raw).ok()?;
            parsed
                .get("sql_query")
                .and_then(Value::as_str)
                .map(str::to_string)
        }
        Value::Object(_) => body
            .get("sql_query")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Explicit row-limit hint from the top-level payload (`limit`, falling
/// back to `queryLimit`). Consulted only when the SQL text itself carries
/// no LIMIT clause. String-encoded integers are accepted, mirroring the
/// original handlers' coercion.
pub fn resolve_explicit_limit(payload: &Value) -> Option<u64> {
    let map = payload.as_object()?;
    ["limit", "queryLimit"].iter().find_map(|key| {
        map.get(*key).and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
    })
}
