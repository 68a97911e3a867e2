//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// The `{ "content": T }` envelope the layout editor front end expects from
/// its AJAX endpoints.
#[derive(Debug, Serialize)]
pub struct ContentResponse<T: Serialize> {
    pub content: T,
}
