//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AppState, AuthStore};
pub use middleware::{CurrentUser, attach_error_path, require_bearer};
pub use router::{api_router, api_router_generic};
