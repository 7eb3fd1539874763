//! Reader for the symbolic notation.
//!
//! Converts source text into a [`Node`] tree whose nodes carry their origin.
//! The reader is purely syntactic: it never evaluates or binds anything, and
//! it either reads the whole input or fails.

use std::sync::Arc;

use pest::error::{Error, ErrorVariant, InputLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::lexical::{decode_color, distill, format_channel, COLOR_CHAR, INDEX_KEYWORD};
use super::{LineIndex, Node, SourceText, Span};
use crate::errors::{ErrorKind, SymbolError};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct SymbolParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Reads `text` into a symbol tree, tagging origins with `source_id`.
pub fn parse(text: &str, source_id: Option<&str>) -> Result<Node, SymbolError> {
    parse_source(Arc::new(SourceText::new(source_id, text)))
}

/// Reads a prepared [`SourceText`]; every origin in the result shares it.
pub fn parse_source(source: Arc<SourceText>) -> Result<Node, SymbolError> {
    let mut pairs = SymbolParser::parse(Rule::document, &source.text)
        .map_err(|error| convert_parse_error(error, &source))?;

    let node = pairs
        .next()
        .and_then(|document| {
            document
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::node)
        })
        .ok_or_else(|| SymbolError::internal("document without a node"))?;

    let builder = TreeBuilder::new(&source);
    builder.build_node(node)
}

/// True when `text` is exactly one number literal, suffix included.
pub fn is_number(text: &str) -> bool {
    SymbolParser::parse(Rule::number_check, text).is_ok()
}

// ============================================================================
// TREE BUILDING
// ============================================================================

struct TreeBuilder<'a> {
    source: &'a Arc<SourceText>,
    lines: LineIndex<'a>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a Arc<SourceText>) -> Self {
        Self {
            source,
            lines: LineIndex::new(&source.text),
        }
    }

    fn origin(&self, start: usize, stop: usize) -> Option<Span> {
        Some(Span::new(
            Arc::clone(self.source),
            self.lines.position(start),
            self.lines.position(stop),
        ))
    }

    fn origin_of(&self, pair: &Pair<'_, Rule>) -> Option<Span> {
        let span = pair.as_span();
        self.origin(span.start(), span.end())
    }

    /// Builds a term followed by any number of index operators, folding them
    /// left to right.
    fn build_node(&self, pair: Pair<'_, Rule>) -> Result<Node, SymbolError> {
        let start = pair.as_span().start();
        let mut inner = pair.into_inner();
        let term = inner
            .next()
            .ok_or_else(|| SymbolError::internal("node without a term"))?;
        let mut target = self.build_term(term)?;

        for index in inner {
            let stop = index.as_span().end();
            let indexer = index
                .into_inner()
                .next()
                .ok_or_else(|| SymbolError::internal("index operator without an indexer"))?;
            let indexer = self.build_term(indexer)?;
            target = desugar_index(target, indexer, self.origin(start, stop));
        }

        Ok(target)
    }

    fn build_term(&self, pair: Pair<'_, Rule>) -> Result<Node, SymbolError> {
        let origin = self.origin_of(&pair);

        match pair.as_rule() {
            Rule::color => {
                let hex = pair.as_str().trim_start_matches(COLOR_CHAR);
                let channels = decode_color(hex)
                    .into_iter()
                    .map(|channel| Node::number(format_channel(channel)))
                    .collect();
                Ok(Node::List(channels, origin))
            }

            Rule::quote => {
                let quoted = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| SymbolError::internal("quote without an expression"))?;
                Ok(Node::Quote(Box::new(self.build_node(quoted)?), origin))
            }

            Rule::text => Ok(Node::Text(distill(pair.as_str()).to_string(), origin)),

            Rule::number => Ok(Node::Number(pair.as_str().to_string(), origin)),

            Rule::atom => Ok(Node::Atom(pair.as_str().trim_end().to_string(), origin)),

            Rule::list => {
                let items = pair
                    .into_inner()
                    .filter(|child| child.as_rule() == Rule::node)
                    .map(|child| self.build_node(child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::List(items, origin))
            }

            rule => Err(SymbolError::internal(format!(
                "unexpected rule in term position: {:?}",
                rule
            ))),
        }
    }
}

/// Rewrites `target . indexer` into its canonical list form.
///
/// A bracketed single number indexes by position, so `a.[0]` and `a.0` read
/// the same.
fn desugar_index(target: Node, indexer: Node, origin: Option<Span>) -> Node {
    let indexer = match indexer {
        Node::List(mut items, _)
            if items.len() == 1 && matches!(items[0], Node::Number(..)) =>
        {
            items.remove(0)
        }
        other => other,
    };
    Node::List(vec![Node::atom(INDEX_KEYWORD), indexer, target], origin)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceText) -> SymbolError {
    let offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let position = LineIndex::new(&source.text).position(offset);

    let positives = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => positives.clone(),
        ErrorVariant::CustomError { .. } => vec![],
    };
    let mut expected: Vec<String> = Vec::new();
    for name in positives.iter().map(describe_rule) {
        if !expected.iter().any(|seen| seen == name) {
            expected.push(name.to_string());
        }
    }

    let at_end = offset >= source.text.len();
    let (kind, message) = if at_end && positives.contains(&Rule::text_end) {
        (ErrorKind::Structural, "unterminated string".to_string())
    } else if at_end && positives.contains(&Rule::list_end) {
        (ErrorKind::Structural, "unterminated list".to_string())
    } else if expected.is_empty() {
        (ErrorKind::Lexical, "unexpected input".to_string())
    } else {
        (ErrorKind::Lexical, format!("expected {}", expected.join(", ")))
    };

    SymbolError::parse(kind, message, position, expected, source)
}

fn describe_rule(rule: &Rule) -> &'static str {
    match rule {
        Rule::color => "color literal",
        Rule::quote => "quote",
        Rule::text | Rule::text_end => "string",
        Rule::number | Rule::hex | Rule::decimal | Rule::fraction | Rule::exponent => "number",
        Rule::suffix => "number suffix",
        Rule::atom => "atom",
        Rule::list => "list",
        Rule::list_end => "`]`",
        Rule::node => "node",
        Rule::index => "index operator",
        Rule::EOI => "end of input",
        _ => "input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_check() {
        assert!(is_number("-5"));
        assert!(is_number("0.0f"));
        assert!(is_number("1e10"));
        assert!(is_number("0xFF"));
        assert!(!is_number("5x9y"));
        assert!(!is_number("a"));
        assert!(!is_number(" 5"));
    }

    #[test]
    fn test_index_origin_covers_target_and_indexer() {
        let node = parse("a.b", None).unwrap();
        let origin = node.origin().unwrap();
        assert_eq!(origin.start.index, 0);
        assert_eq!(origin.stop.index, 3);
        assert_eq!(origin.excerpt(), Some("a.b"));
    }

    #[test]
    fn test_desugar_unwraps_single_number_list() {
        let node = desugar_index(
            Node::atom("a"),
            Node::list(vec![Node::number("0")]),
            None,
        );
        assert_eq!(
            node,
            Node::list(vec![Node::atom("Index"), Node::number("0"), Node::atom("a")])
        );
    }

    #[test]
    fn test_unterminated_string_is_structural() {
        let error = parse("\"abc", None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Structural);
    }
}
