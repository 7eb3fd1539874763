//! Syntax module for the symbolic notation
//!
//! This module provides the symbol tree that the reader produces and the writer
//! consumes, together with the source-location types every parsed node carries.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod lexical;
pub mod parser;
pub mod writer;

// ============================================================================
// SOURCE TRACKING
// ============================================================================

/// The full text handed to one parse call, plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub source_id: Option<String>,
    pub text: String,
}

impl SourceText {
    pub fn new(source_id: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.map(str::to_string),
            text: text.into(),
        }
    }

    /// Name used when labelling diagnostics for this text.
    pub fn display_name(&self) -> &str {
        self.source_id.as_deref().unwrap_or("<input>")
    }
}

/// A location in a [`SourceText`].
///
/// `index` is a byte offset; `line` and `column` are 0-based, with columns
/// counted in characters. [`Display`](fmt::Display) prints them 1-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const ZERO: Position = Position {
        index: 0,
        line: 0,
        column: 0,
    };

    pub fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln: {}, Col: {}", self.line + 1, self.column + 1)
    }
}

/// The origin of a node: the range of source text it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub source: Arc<SourceText>,
    pub start: Position,
    pub stop: Position,
}

impl Span {
    pub fn new(source: Arc<SourceText>, start: Position, stop: Position) -> Self {
        debug_assert!(start <= stop, "span start must not follow its stop");
        Self {
            source,
            start,
            stop,
        }
    }

    /// A span over `source` whose start and stop are both zero.
    pub fn zeroed(source: Arc<SourceText>) -> Self {
        Self::new(source, Position::ZERO, Position::ZERO)
    }

    /// The source text this span covers, if its offsets are valid for the source.
    pub fn excerpt(&self) -> Option<&str> {
        self.source.text.get(self.start.index..self.stop.index)
    }
}

/// Maps byte offsets to line/column positions for one source text.
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    pub(crate) fn position(&self, index: usize) -> Position {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .text
            .get(line_start..index)
            .map_or(0, |prefix| prefix.chars().count());
        Position::new(index, line, column)
    }
}

// ============================================================================
// SYMBOL TREE
// ============================================================================

/// A node of the symbol tree.
///
/// Every variant carries an optional [`Span`]; nodes built in code rather than
/// read from text carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A bare identifier-like token.
    Atom(String, Option<Span>),
    /// A numeric literal kept in its original textual form, suffix included.
    Number(String, Option<Span>),
    /// An explicitly quoted string; holds the unquoted content.
    Text(String, Option<Span>),
    Quote(Box<Node>, Option<Span>),
    List(Vec<Node>, Option<Span>),
}

impl Node {
    pub fn atom(text: impl Into<String>) -> Self {
        Node::Atom(text.into(), None)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Node::Number(text.into(), None)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into(), None)
    }

    pub fn quote(inner: Node) -> Self {
        Node::Quote(Box::new(inner), None)
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::List(items, None)
    }

    /// Returns the origin of this node, if it was read from source text.
    pub fn origin(&self) -> Option<&Span> {
        use Node::*;
        match self {
            Atom(_, origin)
            | Number(_, origin)
            | Text(_, origin)
            | Quote(_, origin)
            | List(_, origin) => origin.as_ref(),
        }
    }

    /// Replaces the origin of this node, leaving its children untouched.
    pub fn with_origin(self, origin: Option<Span>) -> Self {
        use Node::*;
        match self {
            Atom(s, _) => Atom(s, origin),
            Number(s, _) => Number(s, origin),
            Text(s, _) => Text(s, origin),
            Quote(inner, _) => Quote(inner, origin),
            List(items, _) => List(items, origin),
        }
    }

    /// Returns a deep copy of this tree with every origin removed.
    ///
    /// Two trees with equal content and shape compare equal after stripping,
    /// whatever text they were read from.
    pub fn strip_origins(&self) -> Self {
        use Node::*;
        match self {
            Atom(s, _) => Atom(s.clone(), None),
            Number(s, _) => Number(s.clone(), None),
            Text(s, _) => Text(s.clone(), None),
            Quote(inner, _) => Quote(Box::new(inner.strip_origins()), None),
            List(items, _) => List(items.iter().map(Node::strip_origins).collect(), None),
        }
    }

    /// Returns the child nodes if this is a list.
    pub fn as_list(&self) -> Option<&[Node]> {
        if let Node::List(items, _) = self {
            return Some(items);
        }
        None
    }

    /// Converts this node into its children if it is a list.
    pub fn into_list(self) -> Option<Vec<Node>> {
        if let Node::List(items, _) = self {
            return Some(items);
        }
        None
    }

    /// Returns the type name of this node (for diagnostics and conversion messages).
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Atom(..) => "Atom",
            Node::Number(..) => "Number",
            Node::Text(..) => "Text",
            Node::Quote(..) => "Quote",
            Node::List(..) => "List",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&writer::render(self))
    }
}
