//! Token kinds and owned token snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::Attribute;

/// Kind of construct recognised by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `<name attr="value">`
    StartTag,
    /// `</name>`
    EndTag,
    /// `<name attr="value"/>`
    EmptyTag,
    /// `&name;`. Declared for callers but never produced.
    Entity,
    /// `$name(args)`. Declared for callers but never produced.
    Function,
    /// `<![CDATA[ ... ]]>`
    CData,
    /// `<?application ... ?>`
    Pi,
    /// `<!-- ... -->`
    Comment,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::StartTag => "START_TAG",
            TokenKind::EndTag => "END_TAG",
            TokenKind::EmptyTag => "EMPTY_TAG",
            TokenKind::Entity => "ENTITY",
            TokenKind::Function => "FUNCTION",
            TokenKind::CData => "CDATA",
            TokenKind::Pi => "PI",
            TokenKind::Comment => "COMMENT",
        }
    }

    /// Start and empty tags, the only kinds that carry attributes.
    pub fn has_attributes(&self) -> bool {
        matches!(self, TokenKind::StartTag | TokenKind::EmptyTag)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned copy of the tokenizer's state after one call to `next_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// `None` when only plain text was found before end of stream.
    pub kind: Option<TokenKind>,
    pub name: Option<String>,
    pub attributes: Vec<Attribute>,
    /// Plain text preceding the construct.
    pub text: String,
    /// Literal source text of the construct.
    pub content: Option<String>,
}

impl Token {
    pub fn is_tag(&self) -> bool {
        matches!(
            self.kind,
            Some(TokenKind::StartTag | TokenKind::EndTag | TokenKind::EmptyTag)
        )
    }

    /// Value of the last attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| attr.name() == name)
            .map(Attribute::value)
    }
}
