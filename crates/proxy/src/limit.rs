//! Advisory result-fetch bound.
//!
//! The resolved limit only caps the page size requested from the engine;
//! the engine enforces the real LIMIT semantics on the SQL it runs.

use std::sync::OnceLock;

use regex::Regex;

/// Engine-imposed hard cap on rows per result fetch.
pub const ENGINE_MAX_RESULTS: u64 = 1000;

fn limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bLIMIT\s+(\d+)").expect("limit regex compiles"))
}

/// Scan SQL text for a `LIMIT <integer>` clause, case-insensitively.
/// Returns the first match; an unparseable (overlong) integer reads as no
/// limit.
pub fn detect_sql_limit(sql: &str) -> Option<u64> {
    limit_re()
        .captures(sql)
        .and_then(|caps| caps[1].parse().ok())
}

/// Page size for the result fetch: the resolved limit capped at
/// [`ENGINE_MAX_RESULTS`], or the cap itself when nothing resolved.
/// A resolved 0 reads as "no limit", as the original handlers treated it.
pub fn fetch_page_size(resolved_limit: Option<u64>) -> i32 {
    match resolved_limit {
        Some(0) | None => ENGINE_MAX_RESULTS as i32,
        Some(n) => n.min(ENGINE_MAX_RESULTS) as i32,
    }
}
