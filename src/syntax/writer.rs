//! Writer for the symbolic notation.
//!
//! [`render`] maps a tree back to canonical text; reading that text again
//! yields the same tree, origins aside. [`render_pretty`] produces the same
//! tree spread over several lines once lists grow wide.

use super::lexical::{distill, is_explicit, should_be_explicit, INDEX_KEYWORD};
use super::Node;

// ============================================================================
// CANONICAL RENDERING
// ============================================================================

/// Renders `node` as canonical single-line text. Never fails.
pub fn render(node: &Node) -> String {
    match node {
        Node::Atom(s, _) => render_atom(s),
        Node::Number(s, _) => distill(s).to_string(),
        Node::Text(s, _) => format!("\"{}\"", distill(s)),
        Node::Quote(inner, _) => format!("`{}", render(inner)),
        Node::List(items, _) => match IndexSugar::recognize(items) {
            Some(sugar) => sugar.render(),
            None => render_bracketed(items),
        },
    }
}

fn render_atom(s: &str) -> String {
    if s.is_empty() {
        return "\"\"".to_string();
    }
    if !is_explicit(s) && should_be_explicit(s) {
        return format!("\"{}\"", s);
    }
    if is_explicit(s) {
        let distilled = distill(s);
        if !distilled.is_empty() && !should_be_explicit(distilled) {
            return distilled.to_string();
        }
    }
    s.to_string()
}

fn render_bracketed(items: &[Node]) -> String {
    let inner = items.iter().map(render).collect::<Vec<_>>().join(" ");
    format!("[{}]", inner)
}

// ============================================================================
// INDEX SUGAR
// ============================================================================

/// A `[Index indexer target]` list that can be written as `target.indexer`.
enum IndexSugar<'a> {
    /// Positional index, written `target.[n]`.
    Position { index: &'a Node, target: &'a Node },
    /// Any other indexer, written `target.indexer`.
    Key { indexer: &'a Node, target: &'a Node },
}

impl<'a> IndexSugar<'a> {
    /// Matches the canonical index form, rejecting shapes whose sugared text
    /// would read back as a different tree.
    fn recognize(items: &'a [Node]) -> Option<Self> {
        let [Node::Atom(head, _), indexer, target] = items else {
            return None;
        };
        if head != INDEX_KEYWORD || matches!(target, Node::Quote(..)) {
            return None;
        }
        match indexer {
            Node::Number(..) => Some(IndexSugar::Position {
                index: indexer,
                target,
            }),
            // A quoted indexer would swallow any index chained after it, and a
            // one-number list reads back as a bare number.
            Node::Quote(..) => None,
            Node::List(inner, _) if matches!(inner.as_slice(), [Node::Number(..)]) => None,
            _ => Some(IndexSugar::Key { indexer, target }),
        }
    }

    fn render(&self) -> String {
        match self {
            IndexSugar::Position { index, target } => {
                format!("{}.[{}]", render(target), render(index))
            }
            IndexSugar::Key { indexer, target } => {
                // Chaining reads left to right, so a sugared indexer stays bracketed.
                let indexer = match indexer {
                    Node::List(items, _) => render_bracketed(items),
                    other => render(other),
                };
                format!("{}.{}", render(target), indexer)
            }
        }
    }
}

// ============================================================================
// PRETTY RENDERING
// ============================================================================

/// Layout settings for [`render_pretty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyPrinter {
    /// Widest a list may render on one line, indentation included.
    pub max_width: usize,
    /// Spaces per nesting level for broken lists.
    pub indent: usize,
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self {
            max_width: 80,
            indent: 2,
        }
    }
}

/// Renders `node` over multiple lines, breaking lists wider than
/// `printer.max_width`: the head stays on the opening line and each further
/// child gets its own indented line.
pub fn render_pretty(node: &Node, printer: &PrettyPrinter) -> String {
    let mut out = String::new();
    printer.write(node, 0, &mut out);
    out
}

impl PrettyPrinter {
    fn write(&self, node: &Node, depth: usize, out: &mut String) {
        let flat = render(node);
        let width = depth * self.indent + flat.chars().count();

        match node {
            Node::List(items, _)
                if items.len() > 1
                    && width > self.max_width
                    && IndexSugar::recognize(items).is_none() =>
            {
                let padding = " ".repeat((depth + 1) * self.indent);
                out.push('[');
                self.write(&items[0], depth + 1, out);
                for item in &items[1..] {
                    out.push('\n');
                    out.push_str(&padding);
                    self.write(item, depth + 1, out);
                }
                out.push(']');
            }
            Node::Quote(inner, _) => {
                out.push('`');
                self.write(inner, depth, out);
            }
            _ => out.push_str(&flat),
        }
    }
}
