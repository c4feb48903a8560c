//! Content line parse error types.

use std::fmt;

/// Result type for content line parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while tokenizing content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Physical line number where the error occurred (1-based).
    pub line: usize,
    /// Column within the logical line (1-based).
    pub col: usize,
    /// Offending text or additional detail.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            line,
            col,
            context: None,
        }
    }

    /// Attaches context, typically the offending raw line.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.col, self.kind)?;
        if let Some(context) = &self.context {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line starts with `;` or `:`.
    MissingPropertyName,
    /// Property name holds characters outside `A-Z`, `0-9`, `-`.
    InvalidPropertyName,
    /// Malformed parameter name or value.
    InvalidParameter,
    /// Quoted parameter value never closed.
    UnclosedQuote,
    /// No `:` separating the value.
    MissingColon,
    /// Continuation line holds nothing after its whitespace octet.
    EmptyContinuation,
    /// Continuation line with no logical line before it.
    OrphanContinuation,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnclosedQuote => write!(f, "unclosed quote"),
            Self::MissingColon => write!(f, "missing colon"),
            Self::EmptyContinuation => write!(f, "empty continuation line"),
            Self::OrphanContinuation => write!(f, "continuation line without a preceding line"),
        }
    }
}
