//! Generator error types.

use hermes_docs::DocsError;
use hermes_registry::RegistryError;
use thiserror::Error;

/// Errors that can occur during a generation run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Resource metadata or route resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Rendering or writing the document failed.
    #[error(transparent)]
    Docs(#[from] DocsError),
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_is_transparent() {
        let err: GeneratorError = RegistryError::UnknownRoute("login".to_string()).into();
        assert_eq!(err.to_string(), "unknown route: login");
    }
}
