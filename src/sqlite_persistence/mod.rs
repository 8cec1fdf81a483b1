mod versioned_schema;

pub use versioned_schema::*;

use std::time::{Duration, SystemTime};

pub fn system_time_from_column_result(value: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(value.max(0) as u64)
}
