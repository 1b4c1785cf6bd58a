//! Standard error messages shared by handlers and tests.

pub const NO_JSON_DATA: &str = "No JSON data provided";
pub const INVALID_JSON_DATA: &str = "Invalid JSON data provided";
pub const PROCESSING_FAILED: &str = "An error occurred while processing your request";
