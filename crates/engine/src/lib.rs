pub mod athena;
pub mod engine;
pub mod types;

pub use athena::AthenaEngine;
pub use engine::{EngineError, QueryEngine};
pub use types::{
    ColumnInfo, Datum, ExecutionState, ExecutionStatus, ResultSet, ResultSetMetadata, Row,
};
