use std::env;

/// Default Athena database, matching the original deployment.
const DEFAULT_DATABASE: &str = "catapult_db_p";

/// Default S3 output location for query results.
const DEFAULT_OUTPUT_LOCATION: &str = "s3://as-athena-catapult/";

// ── Env helpers ──────────────────────────────────────────────────

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── ProxyConfig ──────────────────────────────────────────────────

/// Configuration for the query pipeline.
///
/// Polling interval and attempt budget are deployment-tunable rather than
/// hard constants; the defaults reproduce the original 5s x 60 attempts
/// (5 minute ceiling).
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Athena database queries run against.
    pub database: String,
    /// S3 path the engine writes result files to.
    pub output_location: String,
    /// Optional AWS region override for the SDK client.
    pub region: Option<String>,
    /// Fixed sleep between status polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Status checks before the pipeline gives up on an execution.
    pub max_poll_attempts: u32,
}

impl ProxyConfig {
    /// Build config from environment variables.
    ///
    /// `ATHENA_REGION` takes precedence over `AWS_REGION`; both absent means
    /// the SDK's own resolution chain decides.
    pub fn from_env() -> Self {
        Self {
            database: env_or("ATHENA_DATABASE", DEFAULT_DATABASE),
            output_location: env_or("ATHENA_OUTPUT_LOCATION", DEFAULT_OUTPUT_LOCATION),
            region: env_opt("ATHENA_REGION").or_else(|| env_opt("AWS_REGION")),
            poll_interval_ms: env_u64("QUERY_POLL_INTERVAL_MS", 5_000),
            max_poll_attempts: env_u32("QUERY_MAX_POLL_ATTEMPTS", 60),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            output_location: DEFAULT_OUTPUT_LOCATION.to_string(),
            region: None,
            poll_interval_ms: 5_000,
            max_poll_attempts: 60,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
