//! Backend test support utilities
//!
//! Helpers shared by the backend's integration tests: Problem Details
//! assertions, unified logging initialization and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
