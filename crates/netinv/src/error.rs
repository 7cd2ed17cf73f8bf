//! Error types for netinv

use thiserror::Error;

/// Result type alias for netinv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by inventory stores and the module registry
#[derive(Debug, Error)]
pub enum Error {
    /// Backing store failure
    #[error("backend error: {0}")]
    Backend(String),

    /// No module registered under this name
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// Module exists but does not provide the requested service
    #[error("module '{module}' does not provide service {service}")]
    ServiceNotFound {
        /// Module that was searched
        module: String,
        /// Type name of the requested service
        service: &'static str,
    },

    /// Rejected cache configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ServiceNotFound {
            module: "storage".to_string(),
            service: "Dao",
        };
        assert_eq!(err.to_string(), "module 'storage' does not provide service Dao");
        assert_eq!(
            Error::Backend("connection refused".to_string()).to_string(),
            "backend error: connection refused"
        );
    }
}
