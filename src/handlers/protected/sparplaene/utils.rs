use uuid::Uuid;

use crate::error::ApiError;

/// Parse the `:id` path segment; anything that is not a UUID is a 400.
pub fn parse_plan_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid savings plan id: {}", raw)))
}
