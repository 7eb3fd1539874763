//! Origin rendering for diagnostics.
//!
//! Turns a [`Span`] into a location line plus an excerpt of the surrounding
//! source with the spanned text underlined. Rendering never fails: any
//! inconsistency between a span and its source degrades to a fixed message.

use std::fmt;

use crate::syntax::{Node, Span};

// === Constants ===

/// Rendered in place of an origin report when a node has no origin.
pub const ORIGIN_UNKNOWN: &str = "Origin unknown.";

/// Rendered in place of the context block when it cannot be built.
pub const CONTEXT_UNAVAILABLE: &str = "Unable to build source context.";

/// Lines of context shown before the first spanned line.
const CONTEXT_LINES_BEFORE: usize = 3;

/// Lines of context shown after the first spanned line.
const CONTEXT_LINES_AFTER: usize = 4;

/// Underline used for spans that cross lines.
const MULTILINE_MARKER: &str = "^^^^^^^";

// === Public API ===

/// Renders the location and source context of `span`, or [`ORIGIN_UNKNOWN`].
pub fn render_origin(span: Option<&Span>) -> String {
    match span {
        Some(span) => format!("{}\n{}", render_location(span), render_context(span)),
        None => ORIGIN_UNKNOWN.to_string(),
    }
}

/// Renders the 1-based start and stop of `span`.
pub fn render_location(span: &Span) -> String {
    format!(
        "{} [{} - {}]",
        span.source.display_name(),
        span.start,
        span.stop
    )
}

/// Renders the lines around `span` with the spanned text underlined.
pub fn render_context(span: &Span) -> String {
    build_context(span).unwrap_or_else(|| CONTEXT_UNAVAILABLE.to_string())
}

// === Formatting Helpers ===

fn build_context(span: &Span) -> Option<String> {
    if span.stop < span.start {
        return None;
    }
    let lines: Vec<&str> = span
        .source
        .text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    let line = span.start.line;
    let spanned_line = lines.get(line)?;
    if span.start.column > spanned_line.chars().count() {
        return None;
    }

    let first = line.saturating_sub(CONTEXT_LINES_BEFORE);
    let last = (line + CONTEXT_LINES_AFTER).min(lines.len() - 1);
    let before = lines.get(first..=line)?;
    let after = lines.get(line + 1..=last)?;

    let mut context = before.join("\n");
    context.push('\n');
    context.push_str(&underline(span));
    if !after.is_empty() {
        context.push('\n');
        context.push_str(&after.join("\n"));
    }
    Some(context)
}

fn underline(span: &Span) -> String {
    if span.start.line != span.stop.line {
        return MULTILINE_MARKER.to_string();
    }
    let width = span.stop.column.saturating_sub(span.start.column).max(1);
    format!("{}{}", " ".repeat(span.start.column), "^".repeat(width))
}

// ============================================================================
// CONVERSION FAILURES
// ============================================================================

/// A failure raised while converting a symbol tree into some other value.
///
/// Conversion code outside this crate raises these; the offending node, when
/// known, lets the failure point back into the text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionFailure {
    pub message: String,
    pub node: Option<Node>,
}

impl ConversionFailure {
    pub fn new(message: impl Into<String>, node: Option<Node>) -> Self {
        Self {
            message: message.into(),
            node,
        }
    }

    /// Origin report for the offending node.
    pub fn render_origin(&self) -> String {
        render_origin(self.node.as_ref().and_then(Node::origin))
    }
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.message, self.render_origin())
    }
}

impl std::error::Error for ConversionFailure {}
