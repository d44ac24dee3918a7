use super::ApiError;
use crate::constants::limits::MAX_HISTORY_LIMIT;

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_HISTORY_LIMIT}"
        )));
    }
    Ok(limit)
}

pub fn validate_record_id(id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid record ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}
