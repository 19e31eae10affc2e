//! The managed-query-engine seam: three operations and their error type.

use async_trait::async_trait;

use crate::types::{ExecutionStatus, ResultSet};

/// Errors surfaced by a [`QueryEngine`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The underlying SDK call failed (credentials, network, or a query the
    /// engine rejected synchronously).
    #[error("engine call failed: {0}")]
    Sdk(String),

    /// The engine answered but left out a field the contract requires.
    #[error("malformed engine response: {0}")]
    MalformedResponse(String),
}

/// The three operations consumed from the managed query engine.
///
/// `submit` / `status` / `results` map one-to-one onto Athena's
/// `StartQueryExecution`, `GetQueryExecution` and `GetQueryResults` calls.
/// The pipeline in `catapult-proxy` drives these against a shared instance;
/// implementations hold no per-request state.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Submit SQL for execution and return the opaque execution id.
    async fn submit(
        &self,
        sql: &str,
        database: &str,
        output_location: &str,
    ) -> Result<String, EngineError>;

    /// One status poll for an in-flight or completed execution.
    async fn status(&self, execution_id: &str) -> Result<ExecutionStatus, EngineError>;

    /// Fetch up to `max_rows` rows (header row included) for a succeeded
    /// execution.
    async fn results(&self, execution_id: &str, max_rows: i32) -> Result<ResultSet, EngineError>;
}
