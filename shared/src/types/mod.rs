//! Type definitions module
//!
//! - `response` - API response wrapper

pub mod response;

pub use response::ApiResponse;
