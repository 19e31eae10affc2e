//! [`QueryEngine`] implementation backed by the AWS Athena SDK.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use tracing::{debug, info};

use crate::engine::{EngineError, QueryEngine};
use crate::types::{
    ColumnInfo, Datum, ExecutionState, ExecutionStatus, ResultSet, ResultSetMetadata, Row,
};

/// Athena-backed engine. One shared instance serves all requests; the SDK
/// client is internally reference-counted and safe to call concurrently.
pub struct AthenaEngine {
    client: aws_sdk_athena::Client,
}

impl AthenaEngine {
    /// Load AWS configuration and build the Athena client.
    ///
    /// Region comes from the environment/credential chain unless an explicit
    /// override is given.
    pub async fn new(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_sdk_athena::config::Region::new(region));
        }
        let aws_cfg = loader.load().await;
        let client = aws_sdk_athena::Client::new(&aws_cfg);

        info!("Athena engine client initialised");
        Self { client }
    }

    /// Build from an existing SDK client (used by callers that manage their
    /// own AWS config).
    pub fn from_client(client: aws_sdk_athena::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueryEngine for AthenaEngine {
    async fn submit(
        &self,
        sql: &str,
        database: &str,
        output_location: &str,
    ) -> Result<String, EngineError> {
        let resp = self
            .client
            .start_query_execution()
            .query_string(sql)
            .query_execution_context(
                aws_sdk_athena::types::QueryExecutionContext::builder()
                    .database(database)
                    .build(),
            )
            .result_configuration(
                aws_sdk_athena::types::ResultConfiguration::builder()
                    .output_location(output_location)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| EngineError::Sdk(e.to_string()))?;

        resp.query_execution_id()
            .map(|id| id.to_string())
            .ok_or_else(|| {
                EngineError::MalformedResponse("no query execution id returned".into())
            })
    }

    async fn status(&self, execution_id: &str) -> Result<ExecutionStatus, EngineError> {
        let resp = self
            .client
            .get_query_execution()
            .query_execution_id(execution_id)
            .send()
            .await
            .map_err(|e| EngineError::Sdk(e.to_string()))?;

        let status = resp
            .query_execution()
            .and_then(|qe| qe.status())
            .ok_or_else(|| EngineError::MalformedResponse("no status in response".into()))?;

        let state = status
            .state()
            .map(|s| ExecutionState::from_engine_str(s.as_str()))
            .unwrap_or(ExecutionState::Queued);
        let reason = status.state_change_reason().map(|r| r.to_string());

        debug!(execution_id = %execution_id, state = state.as_str(), "engine status");
        Ok(ExecutionStatus { state, reason })
    }

    async fn results(&self, execution_id: &str, max_rows: i32) -> Result<ResultSet, EngineError> {
        let resp = self
            .client
            .get_query_results()
            .query_execution_id(execution_id)
            .max_results(max_rows)
            .send()
            .await
            .map_err(|e| EngineError::Sdk(e.to_string()))?;

        let result_set = resp
            .result_set()
            .ok_or_else(|| EngineError::MalformedResponse("no result set in response".into()))?;

        Ok(convert_result_set(result_set))
    }
}

/// Map the SDK result set into our wire-shaped [`ResultSet`], header row
/// and all.
fn convert_result_set(rs: &aws_sdk_athena::types::ResultSet) -> ResultSet {
    let rows = rs
        .rows()
        .iter()
        .map(|row| Row {
            data: row
                .data()
                .iter()
                .map(|d| Datum {
                    var_char_value: d.var_char_value().map(|v| v.to_string()),
                })
                .collect(),
        })
        .collect();

    let column_info = rs
        .result_set_metadata()
        .map(|meta| {
            meta.column_info()
                .iter()
                .map(|ci| ColumnInfo {
                    name: ci.name().to_string(),
                    data_type: ci.r#type().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    ResultSet {
        rows,
        metadata: ResultSetMetadata { column_info },
    }
}
