//! Integer arithmetic tool.

use rmcp::model::ErrorData;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Input for `add`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddRequest {
    pub a: i64,
    pub b: i64,
}

/// Response from `add`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct AddResponse {
    pub result: i64,
}

/// Add two integers, rejecting results that do not fit in an `i64`.
pub fn add(request: &AddRequest) -> Result<AddResponse, ErrorData> {
    request
        .a
        .checked_add(request.b)
        .map(|result| AddResponse { result })
        .ok_or_else(|| {
            ErrorData::invalid_params(
                "Sum does not fit in a 64-bit signed integer",
                Some(json!({ "a": request.a, "b": request.b })),
            )
        })
}
