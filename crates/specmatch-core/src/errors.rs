use thiserror::Error;

/// Result type alias using SpecMatchError
pub type Result<T> = std::result::Result<T, SpecMatchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and the CLI can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Comparison
    /// A selection pattern is not a valid regular expression
    InvalidPattern,
    /// A named default scope does not exist
    UnknownScope,

    // Flattening
    /// A record's `Serialize` impl failed, or JSON/YAML could not be (de)serialized
    Serialization,
    /// A snapshot fixture entry is inconsistent with its declared kind
    InvalidSnapshot,

    // CLI / integration
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::UnknownScope => "ERR_UNKNOWN_SCOPE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional operation and path context.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    pattern: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            pattern: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add canonical path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the offending pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the offending pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(pattern) = &self.pattern {
            write!(f, " (pattern: {})", pattern)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for flattening and comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecMatchError {
    /// Pattern failed to compile
    #[error("Invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Named scope preset is not registered
    #[error("Unknown scope: {name}")]
    UnknownScope { name: String },

    /// A `Serialize` impl reported a failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Snapshot fixture leaf does not match its kind
    #[error("Invalid snapshot entry `{path}`: {reason}")]
    InvalidSnapshot { path: String, reason: String },
}

impl serde::ser::Error for SpecMatchError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SpecMatchError::Serialization {
            message: msg.to_string(),
        }
    }
}

/// Conversion from SpecMatchError to ExError
impl From<SpecMatchError> for ExError {
    fn from(err: SpecMatchError) -> Self {
        let message = err.to_string();
        match err {
            SpecMatchError::InvalidPattern { pattern, .. } => {
                ExError::new(ExErrorKind::InvalidPattern)
                    .with_pattern(pattern)
                    .with_message(message)
            }
            SpecMatchError::UnknownScope { .. } => {
                ExError::new(ExErrorKind::UnknownScope).with_message(message)
            }
            SpecMatchError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            SpecMatchError::InvalidSnapshot { path, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_path(path)
                    .with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SpecMatchError
impl From<serde_json::Error> for SpecMatchError {
    fn from(err: serde_json::Error) -> Self {
        SpecMatchError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidPattern, "ERR_INVALID_PATTERN"),
            (ExErrorKind::UnknownScope, "ERR_UNKNOWN_SCOPE"),
            (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
            (ExErrorKind::InvalidSnapshot, "ERR_INVALID_SNAPSHOT"),
            (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
            (ExErrorKind::Io, "ERR_IO"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("load_snapshot")
            .with_path("metadata.labels.app")
            .with_message("keys collapse");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_INVALID_SNAPSHOT] in operation 'load_snapshot'"));
        assert!(rendered.contains("(path: metadata.labels.app)"));
    }

    #[test]
    fn test_custom_serialize_error_maps_to_serialization() {
        let err = <SpecMatchError as serde::ser::Error>::custom("boom");
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Serialization);
        assert!(ex.message().contains("boom"));
    }
}
