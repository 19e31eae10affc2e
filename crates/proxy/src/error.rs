use catapult_engine::{EngineError, ExecutionState};

/// Internal error taxonomy for the query pipeline.
///
/// The tagged kinds exist for logging and tests. At the boundary every kind
/// is flattened into the legacy 500 envelope via
/// [`ResponseEnvelope::failure`](crate::ResponseEnvelope::failure), with
/// only the `Display` text surviving; callers of the original handlers
/// depend on that flat message format.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No non-empty SQL string could be resolved from the request payload.
    #[error("No SQL query provided in the request")]
    NoQuery,

    /// The engine rejected the submission outright.
    #[error("query submission failed: {0}")]
    Submit(#[source] EngineError),

    /// The execution reached a terminal failure or cancellation. The
    /// message keeps the original `Query <STATE>: <reason>` wording.
    #[error("Query {}: {reason}", .state.as_str())]
    QueryFailed {
        state: ExecutionState,
        reason: String,
    },

    /// A status poll failed at the SDK level.
    #[error("status poll failed: {0}")]
    Poll(#[source] EngineError),

    /// The execution never reached a terminal state within the attempt
    /// budget.
    #[error("Query execution timeout after {attempts} status checks")]
    Timeout { attempts: u32 },

    /// Result retrieval failed after the query succeeded.
    #[error("result fetch failed: {0}")]
    Fetch(#[source] EngineError),
}

impl ProxyError {
    /// Stable tag for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoQuery => "validation",
            Self::Submit(_) => "submission",
            Self::QueryFailed { .. } => "execution",
            Self::Poll(_) => "poll",
            Self::Timeout { .. } => "timeout",
            Self::Fetch(_) => "fetch",
        }
    }
}
