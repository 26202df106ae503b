use serde::Serialize;
use serde_json::Value;

/// Result of an insert, shaped like the MongoDB Node driver's.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub inserted_id: Value,
}

impl InsertOutcome {
    pub fn new(inserted_id: Value) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<Value>,
    pub upserted_count: u64,
}

#[cfg(test)]
impl UpdateOutcome {
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn matched(modified_count: u64) -> Self {
        Self { matched_count: 1, modified_count, ..Self::unmatched() }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

/// `{ "message": ... }` body for informational replies.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
