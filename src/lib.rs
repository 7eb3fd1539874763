//! Symbolic: a lossless text notation for symbol trees.
//!
//! ```text
//! [Entity [Name "Hero"] [Tint #FF0000FF] [Slots.0 `Sword]]
//! ```
//!
//! [`parse`] reads text into a [`Node`] tree whose nodes remember where they
//! came from, [`render`] writes a tree back as canonical text, and
//! [`render_origin`] turns a node's origin into a readable source excerpt.

pub use crate::diagnostics::{render_origin, ConversionFailure};
pub use crate::errors::{ErrorKind, SymbolError};
pub use crate::syntax::parser::{parse, parse_source};
pub use crate::syntax::writer::{render, render_pretty, PrettyPrinter};
pub use crate::syntax::{Node, Position, SourceText, Span};
pub use crate::tabular::{parse_csv, parse_csv_with, CsvOptions};

pub mod diagnostics;
pub mod errors;
pub mod syntax;
pub mod tabular;
