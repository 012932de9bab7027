/// Error taxonomy shared by the repository, service and HTTP layers.
///
/// The repository produces these, the service forwards them unchanged, and
/// the HTTP layer is the only place they are translated into status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Bad input from the client (malformed identifier, bad filter, ...).
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// Any failure talking to the document store.
    #[error("{operation} failed: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    /// The caller or the server aborted the operation in flight.
    #[error("{operation} canceled")]
    Canceled { operation: &'static str },

    /// An invariant broke outside the store, e.g. in a substitute service
    /// facet. The HTTP layer logs the message and answers with a generic 500.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::Store`] from any displayable driver error.
    pub fn store(operation: &'static str, err: impl std::fmt::Display) -> Self {
        CoreError::Store {
            operation,
            message: err.to_string(),
        }
    }
}
