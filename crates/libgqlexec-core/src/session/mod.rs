//! Per-client state tying the pipeline together: schema store, type cache,
//! resolvers and configuration.

mod prepared_operation;
#[allow(clippy::module_inception)]
mod session;
mod session_config;
mod session_error;

pub use prepared_operation::PreparedOperation;
pub use session::Session;
pub use session_config::SessionConfig;
pub use session_config::SessionConfigBuilder;
pub use session_error::SessionError;
