// Request/Response models
pub mod common;
pub mod paywall;
pub mod purchase;
