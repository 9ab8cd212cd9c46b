// Middleware modules
pub mod identity;
pub mod logging;

pub use identity::{identity_middleware, UserIdentity};
pub use logging::logging_middleware;
