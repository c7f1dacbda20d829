//! Common test utilities shared across test types
//!
//! - `mock_api.rs` - Scripted HTTP server standing in for the Todoist API
