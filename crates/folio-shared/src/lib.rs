//! # Folio Shared
//!
//! Wire types shared by the server and any API client.

pub mod dto;
pub mod response;

pub use dto::{CategoryResponse, HealthResponse, PostResponse, PostSummary};
pub use response::{ApiResponse, ErrorResponse};
