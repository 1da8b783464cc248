use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{message}")]
    NotFound {
        message: String,
    },
    #[error("{message}")]
    AlreadyExists {
        message: String,
    },
    // Malformed identifier text supplied by a caller, never produced by storage.
    #[error("{message}")]
    InvalidIdentifier {
        message: String,
    },
    #[error("{message}")]
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    #[error("{message}")]
    Serialization {
        message: String,
    },
    #[error("{message} (reason: {reason_code:?}, retryable: {retryable})")]
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // The backend reported a transient condition (throttling, dispatch or timeout
    // failure inside the client). The caller may retry with or without a backoff.
    #[error("{message} (reason: {reason_code:?}, retryable: {retryable})")]
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    #[error("{message}")]
    Configuration {
        message: String,
    },
    #[error("{message}")]
    Cancelled {
        message: String,
    },
}

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn already_exists(message: &str) -> LibraryError {
        LibraryError::AlreadyExists { message: message.to_string() }
    }

    pub fn invalid_identifier(message: &str) -> LibraryError {
        LibraryError::InvalidIdentifier { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn configuration(message: &str) -> LibraryError {
        LibraryError::Configuration { message: message.to_string() }
    }

    pub fn cancelled(message: &str) -> LibraryError {
        LibraryError::Cancelled { message: message.to_string() }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {}", message).as_str(), reason, true)
        } else {
            LibraryError::database(
                format!("ddb database error {}", message).as_str(), reason, false)
        }
    }

    /// Prefixes the message with `ctx` while keeping the error kind, so callers can
    /// still match on the variant after each layer adds its own context.
    pub fn context(mut self, ctx: &str) -> LibraryError {
        let message = self.message_mut();
        *message = format!("{}: {}", ctx, message);
        self
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::NotFound { message } => message,
            LibraryError::AlreadyExists { message } => message,
            LibraryError::InvalidIdentifier { message } => message,
            LibraryError::Validation { message, .. } => message,
            LibraryError::Serialization { message } => message,
            LibraryError::Database { message, .. } => message,
            LibraryError::CurrentlyUnavailable { message, .. } => message,
            LibraryError::Configuration { message } => message,
            LibraryError::Cancelled { message } => message,
        }
    }

    fn message_mut(&mut self) -> &mut String {
        match self {
            LibraryError::NotFound { message } => message,
            LibraryError::AlreadyExists { message } => message,
            LibraryError::InvalidIdentifier { message } => message,
            LibraryError::Validation { message, .. } => message,
            LibraryError::Serialization { message } => message,
            LibraryError::Database { message, .. } => message,
            LibraryError::CurrentlyUnavailable { message, .. } => message,
            LibraryError::Configuration { message } => message,
            LibraryError::Cancelled { message } => message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, LibraryError::AlreadyExists { .. })
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {}", err).as_str())
    }
}

impl From<uuid::Error> for LibraryError {
    fn from(err: uuid::Error) -> Self {
        LibraryError::invalid_identifier(
            format!("invalid book id {}", err).as_str())
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(err: config::ConfigError) -> Self {
        LibraryError::configuration(
            format!("failed to load configuration {}", err).as_str())
    }
}

/// Result type shared by stores, services and helpers.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_already_exists_error() {
        assert!(matches!(LibraryError::already_exists("test"), LibraryError::AlreadyExists{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ .. }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ .. }));
    }

    #[tokio::test]
    async fn test_should_keep_kind_when_adding_context() {
        let err = LibraryError::not_found("book not found").context("findone: bookID[42]");
        assert!(err.is_not_found());
        assert_eq!("findone: bookID[42]: book not found", err.message());
        assert_eq!("findone: bookID[42]: book not found", err.to_string());

        let err = LibraryError::already_exists("book already exists").context("memory.save").context("save");
        assert!(err.is_already_exists());
        assert_eq!("save: memory.save: book already exists", err.message());
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::database("test", None, false).retryable());
        assert_eq!(true, LibraryError::database("test", None, true).retryable());
        assert_eq!(false, LibraryError::already_exists("test").retryable());
        assert_eq!(false, LibraryError::not_found("test").retryable());
        assert_eq!(false, LibraryError::unavailable("test", None, false).retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::validation("test", None).retryable());
        assert_eq!(false, LibraryError::serialization("test").retryable());
        assert_eq!(false, LibraryError::cancelled("test").retryable());
    }

    #[tokio::test]
    async fn test_should_map_uuid_error_to_invalid_identifier() {
        let err = uuid::Uuid::parse_str("not-a-uuid").map_err(LibraryError::from).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidIdentifier { .. }));
    }
}
