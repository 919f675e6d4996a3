//! # HXML Tokenizer
//!
//! Streaming, character-level tokenizer for HXML templates: XML/HTML-like
//! markup recognising start, end and empty tags, comments, CDATA sections
//! and processing instructions.
//!
//! The tokenizer is pull based. Each call to [`Tokenizer::next_token`]
//! consumes characters up to and including the next recognised construct,
//! and the caller inspects the result through accessors that stay valid
//! until the following call.
//!
//! ```
//! use hxml_tokenizer::{TokenKind, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::from_text("Hello <b class=\"x\">world</b>");
//! assert!(tokenizer.next_token().unwrap());
//! assert_eq!(tokenizer.kind(), Some(TokenKind::StartTag));
//! assert_eq!(tokenizer.name(), Some("b"));
//! assert_eq!(tokenizer.text(), "Hello ");
//! assert_eq!(tokenizer.attribute("class"), Some("x"));
//! ```

pub mod attributes;
pub mod buffer;
pub mod config;
pub mod pushback;
pub mod source;
pub mod token;
pub mod tokenizer;

use thiserror::Error;

pub use attributes::{Attribute, Attributes};
pub use config::TokenizerConfig;
pub use source::{CharSource, LineCountingSource, ReaderSource, StrSource};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, tokenize_with, Tokenizer};

/// Errors raised while tokenizing.
///
/// Every error is fatal to the tokenizer that raised it: the in-progress
/// token is invalid and the instance should be dropped.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed markup, such as a missing required character or an
    /// invalid name.
    #[error("Line:{line}; {message}")]
    Syntax { line: usize, message: String },

    /// The source ended in the middle of a construct.
    #[error("Line:{line}; Unexpected end of input, expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// More characters were pushed back than the lookahead stack holds.
    #[error("Line:{line}; Pushback buffer overflow")]
    BufferOverflow { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line the error was raised on, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::BufferOverflow { line } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}

/// Result type for tokenizer operations.
pub type ParseResult<T> = Result<T, ParseError>;
