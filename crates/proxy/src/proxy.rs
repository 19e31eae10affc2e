//! The resolve -> submit -> poll -> fetch pipeline.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use catapult_engine::{ExecutionState, QueryEngine, ResultSet};

use crate::config::ProxyConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::ProxyError;
use crate::limit::{detect_sql_limit, fetch_page_size};
use crate::request::{resolve_explicit_limit, resolve_sql};

/// Outcome of a successful pipeline run.
#[derive(Debug)]
pub struct QueryOutput {
    /// Execution id the engine assigned to this run.
    pub execution_id: String,
    /// Fetched result page, header row included at index 0.
    pub result_set: ResultSet,
    /// Status polls it took to observe SUCCEEDED.
    pub poll_attempts: u32,
}

/// Single parameterized replacement for the original pair of hand-forked
/// handlers.
///
/// One instance is shared across requests; every [`handle`](Self::handle)
/// call runs an independent cycle against the engine with no shared
/// mutable state, so concurrent requests need no coordination. Identical
/// SQL submitted twice yields two executions; nothing is deduplicated.
pub struct QueryProxy<E> {
    engine: E,
    config: ProxyConfig,
}

impl<E: QueryEngine> QueryProxy<E> {
    pub fn new(engine: E, config: ProxyConfig) -> Self {
        Self { engine, config }
    }

    /// Run the pipeline and flatten any failure into the legacy envelope.
    ///
    /// This is the public contract: it never returns an error, only a 200
    /// or 500 envelope.
    pub async fn handle(&self, payload: &Value) -> ResponseEnvelope {
        match self.execute(payload).await {
            Ok(output) => ResponseEnvelope::success(&output.result_set),
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "query pipeline failed");
                ResponseEnvelope::failure(&err.to_string())
            }
        }
    }

    /// Run the pipeline, keeping the tagged error kinds.
    pub async fn execute(&self, payload: &Value) -> Result<QueryOutput, ProxyError> {
        let sql = resolve_sql(payload)?;
        let sql_limit = detect_sql_limit(&sql);
        let resolved_limit = sql_limit.or_else(|| resolve_explicit_limit(payload));

        info!(
            sql_len = sql.len(),
            sql_limit = ?sql_limit,
            resolved_limit = ?resolved_limit,
            "resolved query"
        );

        let execution_id = self
            .engine
            .submit(&sql, &self.config.database, &self.config.output_location)
            .await
            .map_err(ProxyError::Submit)?;
        info!(execution_id = %execution_id, "query submitted");

        let poll_attempts = self.wait_for_completion(&execution_id).await?;

        let page_size = fetch_page_size(resolved_limit);
        let result_set = self
            .engine
            .results(&execution_id, page_size)
            .await
            .map_err(ProxyError::Fetch)?;

        let data_rows = result_set.data_row_count();
        info!(
            execution_id = %execution_id,
            rows = data_rows,
            page_size,
            poll_attempts,
            "results fetched"
        );

        // Diagnostic only: the engine owns LIMIT enforcement, so an
        // oversized page is logged, never corrected or failed.
        if let Some(limit) = sql_limit {
            if data_rows as u64 > limit {
                warn!(
                    execution_id = %execution_id,
                    rows = data_rows,
                    sql_limit = limit,
                    "fetched more rows than the SQL LIMIT"
                );
            }
        }

        Ok(QueryOutput {
            execution_id,
            result_set,
            poll_attempts,
        })
    }

    /// Fixed-interval polling until the execution reaches a terminal state.
    ///
    /// pending -> succeeded | failed/cancelled | timed out. No backoff, no
    /// jitter, no caller-side cancellation; exhausting the attempt budget
    /// is the timeout.
    async fn wait_for_completion(&self, execution_id: &str) -> Result<u32, ProxyError> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        for attempt in 1..=self.config.max_poll_attempts {
            let status = self
                .engine
                .status(execution_id)
                .await
                .map_err(ProxyError::Poll)?;
            debug!(
                execution_id = %execution_id,
                attempt,
                state = status.state.as_str(),
                "query status"
            );

            match status.state {
                ExecutionState::Succeeded => return Ok(attempt),
                ExecutionState::Failed | ExecutionState::Cancelled => {
                    return Err(ProxyError::QueryFailed {
                        state: status.state,
                        reason: status.reason.unwrap_or_else(|| "Unknown".to_string()),
                    });
                }
                ExecutionState::Queued | ExecutionState::Running => {
                    tokio::time::sleep(interval).await;
                }
            }
        }

        Err(ProxyError::Timeout {
            attempts: self.config.max_poll_attempts,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests — scripted engine, no AWS calls
// ---------------------------------------------------------------------------
