//! Application error type.
//!
//! The dashboard is fail-fast: every error here terminates the process
//! before the HTTP listener starts, so the server never serves partial or
//! incorrect data. Kinds map to stable exit codes for scripting.

/// Failure categories surfaced at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input file missing/unreadable, or no rows survived cleaning.
    DataLoad,
    /// A required CSV column is absent.
    SchemaMismatch,
    /// Fewer than two full seasonal cycles of monthly history.
    InsufficientHistory,
    /// Internal numeric or rendering failure.
    Internal,
    /// Could not bind or run the HTTP server.
    Server,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::DataLoad | ErrorKind::SchemaMismatch => 2,
            ErrorKind::InsufficientHistory => 3,
            ErrorKind::Internal => 4,
            ErrorKind::Server => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn data_load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataLoad, message)
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaMismatch, message)
    }

    pub fn insufficient_history(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientHistory, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(AppError::data_load("x").exit_code(), 2);
        assert_eq!(AppError::schema_mismatch("x").exit_code(), 2);
        assert_eq!(AppError::insufficient_history("x").exit_code(), 3);
        assert_eq!(AppError::internal("x").exit_code(), 4);
        assert_eq!(AppError::server("x").exit_code(), 5);
    }
}
