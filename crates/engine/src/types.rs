//! Engine-side data model: execution lifecycle states and the wire-shaped
//! result set.
//!
//! The result types serialize with Athena's PascalCase field names so that
//! the success envelope body stays byte-compatible with the original
//! `{"ResultSet": {...}}` output.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Execution lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state reported by the engine for one query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl ExecutionState {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }

    /// Map an engine state string onto the lifecycle.
    ///
    /// Unknown strings are treated as still queued, which keeps the polling
    /// loop waiting instead of misreading a future SDK variant as terminal.
    pub fn from_engine_str(s: &str) -> Self {
        match s {
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            "RUNNING" => Self::Running,
            _ => Self::Queued,
        }
    }

    /// The engine's uppercase spelling, used in log fields and error text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Status snapshot from one poll of the engine.
#[derive(Debug, Clone)]
pub struct ExecutionStatus {
    pub state: ExecutionState,
    /// Engine-reported reason, populated for FAILED and CANCELLED states.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Result set (Athena wire shape)
// ---------------------------------------------------------------------------

/// One cell of a result row. Athena reports every value as an optional
/// varchar; `None` is SQL NULL and the key is omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    #[serde(rename = "VarCharValue", skip_serializing_if = "Option::is_none")]
    pub var_char_value: Option<String>,
}

/// One result row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Data", default)]
    pub data: Vec<Datum>,
}

/// Column definition from the result-set metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSetMetadata {
    #[serde(rename = "ColumnInfo", default)]
    pub column_info: Vec<ColumnInfo>,
}

/// One fetched page of query results, shaped like Athena's
/// `GetQueryResults` response. Row 0 is the header echo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "Rows", default)]
    pub rows: Vec<Row>,
    #[serde(rename = "ResultSetMetadata", default)]
    pub metadata: ResultSetMetadata,
}

impl ResultSet {
    /// Number of data rows, excluding the header echo at index 0.
    /// An empty page reports zero rather than underflowing.
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(v: &str) -> Datum {
        Datum {
            var_char_value: Some(v.to_string()),
        }
    }

    #[test]
    fn terminal_states() {
        assert!(ExecutionState::Succeeded.is_terminal());
        assert!(ExecutionState::Failed.is_terminal());
        assert!(ExecutionState::Cancelled.is_terminal());
        assert!(!ExecutionState::Queued.is_terminal());
        assert!(!ExecutionState::Running.is_terminal());
    }

    #[test]
    fn state_parsing_round_trips() {
        for state in [
            ExecutionState::Queued,
            ExecutionState::Running,
            ExecutionState::Succeeded,
            ExecutionState::Failed,
            ExecutionState::Cancelled,
        ] {
            assert_eq!(ExecutionState::from_engine_str(state.as_str()), state);
        }
    }

    #[test]
    fn unknown_state_reads_as_queued() {
        assert_eq!(
            ExecutionState::from_engine_str("SOMETHING_NEW"),
            ExecutionState::Queued
        );
        assert!(!ExecutionState::from_engine_str("SOMETHING_NEW").is_terminal());
    }

    #[test]
    fn data_row_count_excludes_header() {
        let rs = ResultSet {
            rows: vec![
                Row { data: vec![cell("id")] },
                Row { data: vec![cell("1")] },
                Row { data: vec![cell("2")] },
            ],
            metadata: ResultSetMetadata::default(),
        };
        assert_eq!(rs.data_row_count(), 2);
    }

    #[test]
    fn data_row_count_empty_is_zero() {
        // Must not underflow when the engine returns no rows at all.
        assert_eq!(ResultSet::default().data_row_count(), 0);
    }

    #[test]
    fn serializes_with_athena_field_names() {
        let rs = ResultSet {
            rows: vec![Row {
                data: vec![cell("alice"), Datum::default()],
            }],
            metadata: ResultSetMetadata {
                column_info: vec![ColumnInfo {
                    name: "name".into(),
                    data_type: "varchar".into(),
                }],
            },
        };

        let json = serde_json::to_value(&rs).expect("serialize");
        assert_eq!(json["Rows"][0]["Data"][0]["VarCharValue"], "alice");
        // NULL cells omit the key entirely, matching the wire format.
        assert!(json["Rows"][0]["Data"][1].as_object().unwrap().is_empty());
        assert_eq!(json["ResultSetMetadata"]["ColumnInfo"][0]["Name"], "name");
        assert_eq!(json["ResultSetMetadata"]["ColumnInfo"][0]["Type"], "varchar");
    }

    #[test]
    fn deserializes_engine_response_shape() {
        let raw = r#"{
            "Rows": [
                {"Data": [{"VarCharValue": "id"}]},
                {"Data": [{"VarCharValue": "7"}]},
                {"Data": [{}]}
            ],
            "ResultSetMetadata": {
                "ColumnInfo": [{"Name": "id", "Type": "bigint"}]
            }
        }"#;

        let rs: ResultSet = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(rs.rows.len(), 3);
        assert_eq!(rs.data_row_count(), 2);
        assert_eq!(rs.rows[1].data[0].var_char_value.as_deref(), Some("7"));
        assert_eq!(rs.rows[2].data[0].var_char_value, None);
        assert_eq!(rs.metadata.column_info[0].data_type, "bigint");
    }
}
