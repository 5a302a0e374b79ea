use std::fmt;

/// All errors produced while building tags, gradients and grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsGridError {
    pub kind: ErrorKind,
    /// Where the error happened, e.g. `row 0, cell 2`.
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Malformed color, missing tag name, bad caption position.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Content or value supplied in a shape that cannot be rendered.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Content passed to a self-closing tag.
    #[error("contract violation: {0}")]
    ContractViolation(String),
    /// Recognized but not implemented (e.g. the `text` cell style).
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl fmt::Display for StatsGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(context) = &self.context {
            write!(f, " (in {context})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StatsGridError {}

impl From<ErrorKind> for StatsGridError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsGridError>;

/// Shorthand constructors.
impl StatsGridError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ErrorKind::InvalidArgument(msg.into()).into()
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        ErrorKind::TypeMismatch(msg.into()).into()
    }

    pub fn contract_violation(msg: impl Into<String>) -> Self {
        ErrorKind::ContractViolation(msg.into()).into()
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        ErrorKind::Unsupported(msg.into()).into()
    }

    /// Attach a location to the error. An existing context is kept as the
    /// innermost part, so nested calls read outer-to-inner.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(inner) => format!("{context}, {inner}"),
            None => context,
        });
        self
    }
}
