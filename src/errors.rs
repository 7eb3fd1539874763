//! Error handling for the notation reader and the CSV adapter.
//!
//! Every failure is a [`SymbolError`]. Parse failures carry the furthest
//! position the grammar reached and a `miette` source excerpt, so callers can
//! print them either through `miette::Report` or from the fields directly.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::{Position, SourceText};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Broad class of a [`SymbolError`], for callers and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No grammar alternative matches at some position.
    Lexical,
    /// A list or string is still open at end of input.
    Structural,
    /// The delimited-text layer rejected its input.
    Csv,
    /// A parse tree did not have the shape the grammar guarantees.
    Internal,
}

impl ErrorKind {
    /// Error code suffix used in diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Structural => "structural",
            Self::Csv => "csv",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_suffix())
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("Parse error at {position}: {message}")]
    Parse {
        kind: ErrorKind,
        message: String,
        /// Furthest position the grammar reached.
        position: Position,
        /// Readable names of what the grammar would have accepted there.
        expected: Vec<String>,
        source_code: NamedSource<String>,
    },

    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to read cell at row {row}, column {column}")]
    Cell {
        row: usize,
        column: usize,
        #[source]
        source: Box<SymbolError>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SymbolError {
    pub(crate) fn parse(
        kind: ErrorKind,
        message: impl Into<String>,
        position: Position,
        expected: Vec<String>,
        source: &SourceText,
    ) -> Self {
        SymbolError::Parse {
            kind,
            message: message.into(),
            position,
            expected,
            source_code: NamedSource::new(source.display_name(), source.text.clone()),
        }
    }

    /// Creates an internal error; these indicate a reader bug, not bad input.
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        SymbolError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SymbolError::Parse { kind, .. } => *kind,
            SymbolError::Csv(_) => ErrorKind::Csv,
            SymbolError::Cell { source, .. } => source.kind(),
            SymbolError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// The furthest position reached by a failed parse, if this is one.
    pub fn position(&self) -> Option<Position> {
        match self {
            SymbolError::Parse { position, .. } => Some(*position),
            SymbolError::Cell { source, .. } => source.position(),
            SymbolError::Csv(_) | SymbolError::Internal { .. } => None,
        }
    }

    fn primary_label(&self) -> String {
        match self {
            SymbolError::Parse {
                kind: ErrorKind::Structural,
                ..
            } => "still open here".into(),
            SymbolError::Parse { expected, .. } if !expected.is_empty() => {
                format!("expected {}", expected.join(", "))
            }
            _ => "unexpected input".into(),
        }
    }
}

impl Diagnostic for SymbolError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("symbolic::{}", self.kind().code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            SymbolError::Parse {
                kind: ErrorKind::Structural,
                message,
                ..
            } if message.contains("list") => Some(Box::new("close the list with `]`")),
            SymbolError::Parse {
                kind: ErrorKind::Structural,
                ..
            } => Some(Box::new("close the string with `\"`")),
            SymbolError::Internal { .. } => Some(Box::new(
                "This is an internal reader error. Please report this as a bug.",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            SymbolError::Parse { source_code, .. } => Some(source_code),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let SymbolError::Parse { position, .. } = self else {
            return None;
        };
        let label = LabeledSpan::new(Some(self.primary_label()), position.index, 0);
        Some(Box::new(std::iter::once(label)))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        match self {
            SymbolError::Cell { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
