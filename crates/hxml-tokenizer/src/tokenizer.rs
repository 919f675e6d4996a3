//! HXML tokenizer.
//!
//! A pull tokenizer over a [`CharSource`]. Plain text is accumulated until
//! the next construct is recognised; the construct and the text before it
//! are then reported together as one token.

use tracing::{debug, trace};

use crate::attributes::{Attribute, Attributes};
use crate::buffer::TokenBuffer;
use crate::config::TokenizerConfig;
use crate::pushback::PushbackReader;
use crate::source::{CharSource, StrSource};
use crate::token::{Token, TokenKind};
use crate::{ParseError, ParseResult};

const COMMENT_END: &str = "-->";
const CDATA_OPEN: &str = "CDATA[";
const CDATA_END: &str = "]]>";
const PI_END: &str = "?>";

/// Per-token state, reset at the start of every `next_token` call.
#[derive(Debug, Default)]
struct TokenState {
    buffer: TokenBuffer,
    attributes: Attributes,
    kind: Option<TokenKind>,
    name: Option<String>,
}

impl TokenState {
    fn reset(&mut self) {
        self.buffer.clear();
        self.attributes.clear();
        self.kind = None;
        self.name = None;
    }
}

/// Streaming HXML tokenizer.
///
/// Bound to one source for its whole life. After an error the instance
/// must not be used again.
pub struct Tokenizer<S> {
    input: PushbackReader<S>,
    state: TokenState,
    config: TokenizerConfig,
}

impl<'a> Tokenizer<StrSource<'a>> {
    /// Tokenizer over a string with the default configuration.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(StrSource::new(input))
    }
}

impl<S: CharSource> Tokenizer<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, TokenizerConfig::default())
    }

    pub fn with_config(source: S, config: TokenizerConfig) -> Self {
        Self {
            input: PushbackReader::new(source),
            state: TokenState::default(),
            config,
        }
    }

    /// Advance to the next token.
    ///
    /// Returns `Ok(false)` at end of stream. Trailing text with no construct
    /// after it is returned once as a token whose [`kind`](Self::kind) is
    /// `None`.
    pub fn next_token(&mut self) -> ParseResult<bool> {
        self.state.reset();

        let result = self.dispatch();
        match &result {
            Ok(true) => trace!(
                kind = ?self.state.kind,
                name = ?self.state.name,
                line = self.line_number(),
                "Token"
            ),
            Ok(false) => trace!(line = self.line_number(), "End of input"),
            Err(err) => debug!(line = ?err.line(), error = %err, "Tokenizer error"),
        }
        result
    }

    /// Kind of the current token, `None` for trailing plain text.
    pub fn kind(&self) -> Option<TokenKind> {
        self.state.kind
    }

    /// Tag name or PI application name.
    pub fn name(&self) -> Option<&str> {
        self.state.name.as_deref()
    }

    /// Attributes of the current start or empty tag, in source order.
    pub fn attributes(&self) -> &[Attribute] {
        match self.state.kind {
            Some(kind) if kind.has_attributes() => self.state.attributes.as_slice(),
            _ => &[],
        }
    }

    /// Value of the named attribute of the current start or empty tag.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self.state.kind {
            Some(kind) if kind.has_attributes() => self.state.attributes.get(name),
            _ => None,
        }
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes().iter().map(Attribute::name)
    }

    /// Literal source text of the current construct, delimiters included.
    pub fn content(&self) -> Option<&str> {
        self.state.buffer.content()
    }

    /// Plain text read before the current construct.
    pub fn text(&self) -> &str {
        self.state.buffer.text()
    }

    /// 1-based line currently being read.
    pub fn line_number(&self) -> usize {
        self.input.line_number()
    }

    /// Owned copy of the current token.
    pub fn snapshot(&self) -> Token {
        Token {
            kind: self.kind(),
            name: self.state.name.clone(),
            attributes: self.attributes().to_vec(),
            text: self.text().to_string(),
            content: self.content().map(str::to_string),
        }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    pub fn set_config(&mut self, config: TokenizerConfig) {
        self.config = config;
    }

    pub fn ignores_comments(&self) -> bool {
        self.config.ignore_comments
    }

    pub fn ignores_cdata(&self) -> bool {
        self.config.ignore_cdata
    }

    pub fn ignores_pi(&self) -> bool {
        self.config.ignore_pi
    }

    pub fn set_ignore_comments(&mut self, ignore: bool) {
        self.config.ignore_comments = ignore;
    }

    pub fn set_ignore_cdata(&mut self, ignore: bool) {
        self.config.ignore_cdata = ignore;
    }

    pub fn set_ignore_pi(&mut self, ignore: bool) {
        self.config.ignore_pi = ignore;
    }

    /// Give the source back to the caller.
    pub fn into_source(self) -> S {
        self.input.into_inner()
    }

    fn dispatch(&mut self) -> ParseResult<bool> {
        loop {
            let start = self.state.buffer.len();
            match self.input.read()? {
                Some('<') => {
                    self.state.buffer.push('<');
                    if self.parse_markup(start)? {
                        return Ok(true);
                    }
                }
                Some(ch) => self.state.buffer.push(ch),
                None => return Ok(!self.state.buffer.is_empty()),
            }
        }
    }

    /// Called after `<`. Returns false if the markup turned out to be text.
    fn parse_markup(&mut self, start: usize) -> ParseResult<bool> {
        match self.next_char("markup after '<'")? {
            '!' => {
                self.state.buffer.push('!');
                match self.input.read()? {
                    Some('-') => {
                        self.state.buffer.push('-');
                        self.require('-')?;
                        self.parse_comment(start)
                    }
                    Some('[') => {
                        self.state.buffer.push('[');
                        self.require_str(CDATA_OPEN)?;
                        self.parse_cdata(start)
                    }
                    Some(ch) => {
                        self.input.unread(ch)?;
                        Ok(false)
                    }
                    None => Ok(false),
                }
            }
            '?' => {
                self.state.buffer.push('?');
                self.parse_pi(start)
            }
            '/' => {
                self.state.buffer.push('/');
                self.parse_end_tag(start)
            }
            ch => {
                self.input.unread(ch)?;
                self.parse_start_tag(start)
            }
        }
    }

    /// Assumes `<!--` has been consumed.
    fn parse_comment(&mut self, start: usize) -> ParseResult<bool> {
        self.parse_until(COMMENT_END)?;
        if self.config.ignore_comments {
            return Ok(self.fold(TokenKind::Comment));
        }
        Ok(self.emit(start, TokenKind::Comment, None))
    }

    /// Assumes `<![CDATA[` has been consumed.
    fn parse_cdata(&mut self, start: usize) -> ParseResult<bool> {
        self.parse_until(CDATA_END)?;
        if self.config.ignore_cdata {
            return Ok(self.fold(TokenKind::CData));
        }
        Ok(self.emit(start, TokenKind::CData, None))
    }

    /// Assumes `<?` has been consumed. Whitespace between the application
    /// name and the body is collapsed to a single space in the token
    /// content; a suppressed PI keeps it as read.
    fn parse_pi(&mut self, start: usize) -> ParseResult<bool> {
        let name = self.name_token()?;

        if self.try_read(PI_END)? {
            self.state.buffer.push_str(PI_END);
        } else {
            let ch = self.next_char("whitespace")?;
            if !ch.is_whitespace() {
                return Err(self.syntax(format!("Whitespace required: {ch}")));
            }
            if self.config.ignore_pi {
                self.state.buffer.push(ch);
                self.parse_whitespace()?;
            } else {
                self.state.buffer.push(' ');
                self.skip_whitespace()?;
            }
            self.parse_until(PI_END)?;
        }

        if self.config.ignore_pi {
            return Ok(self.fold(TokenKind::Pi));
        }
        Ok(self.emit(start, TokenKind::Pi, Some(name)))
    }

    /// Assumes `</` has been consumed. Anything between the name and the
    /// closing `>` is consumed without validation.
    fn parse_end_tag(&mut self, start: usize) -> ParseResult<bool> {
        let name = self.name_token()?;
        self.parse_whitespace()?;
        loop {
            let ch = self.next_char("'>'")?;
            self.state.buffer.push(ch);
            if ch == '>' {
                break;
            }
        }
        Ok(self.emit(start, TokenKind::EndTag, Some(name)))
    }

    /// Assumes `<` has been consumed.
    fn parse_start_tag(&mut self, start: usize) -> ParseResult<bool> {
        let name = self.name_token()?;
        self.parse_whitespace()?;

        let mut ch = self.next_char("'>' or '/>'")?;
        while ch != '/' && ch != '>' {
            self.input.unread(ch)?;
            self.parse_attribute()?;
            self.parse_whitespace()?;
            ch = self.next_char("'>' or '/>'")?;
        }
        self.state.buffer.push(ch);

        if ch == '/' {
            self.require('>')?;
            return Ok(self.emit(start, TokenKind::EmptyTag, Some(name)));
        }
        Ok(self.emit(start, TokenKind::StartTag, Some(name)))
    }

    /// Parse one `name=value` pair. Quoted values end at the matching
    /// quote unless it is preceded by a backslash; unquoted values end at
    /// `/`, `>` or whitespace.
    fn parse_attribute(&mut self) -> ParseResult<()> {
        let name = self.name_token()?;
        self.parse_whitespace()?;
        self.require('=')?;
        self.parse_whitespace()?;

        let quote = match self.next_char("attribute value")? {
            ch @ ('"' | '\'') => {
                self.state.buffer.push(ch);
                Some(ch)
            }
            ch => {
                self.input.unread(ch)?;
                None
            }
        };

        let value_start = self.state.buffer.len();
        let value_end = match quote {
            Some(quote) => self.parse_quoted_value(quote)?,
            None => self.parse_unquoted_value()?,
        };

        let value = self.state.buffer.slice(value_start, value_end).to_string();
        self.state.attributes.push(name, value);
        Ok(())
    }

    /// Returns the buffer index where the value ends, before the quote.
    fn parse_quoted_value(&mut self, quote: char) -> ParseResult<usize> {
        let mut prev = None;
        loop {
            let line = self.line_number();
            let ch = self.next_char("closing quote")?;
            let escaped = prev == Some('\\');

            if ch == quote && !escaped {
                let end = self.state.buffer.len();
                self.state.buffer.push(ch);
                return Ok(end);
            }
            if ch == '\n' || ch == '\r' {
                return Err(ParseError::Syntax {
                    line,
                    message: "Newline in attribute value.".into(),
                });
            }
            if (ch == '/' || ch == '>') && !escaped {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("Attribute value was not closed correctly: {ch}"),
                });
            }

            self.state.buffer.push(ch);
            prev = Some(ch);
        }
    }

    fn parse_unquoted_value(&mut self) -> ParseResult<usize> {
        loop {
            match self.input.read()? {
                Some(ch) if ch == '/' || ch == '>' || ch.is_whitespace() => {
                    self.input.unread(ch)?;
                    return Ok(self.state.buffer.len());
                }
                Some(ch) => self.state.buffer.push(ch),
                None => return Err(self.unexpected_eof("'>'")),
            }
        }
    }

    /// Consume up to and including `pattern`, appending everything.
    ///
    /// On a partial match, everything read after the pattern's first
    /// character is pushed back and scanning resumes from there, so
    /// overlapping candidates such as `--->` are not skipped.
    fn parse_until(&mut self, pattern: &str) -> ParseResult<()> {
        let delim: Vec<char> = pattern.chars().collect();

        'scan: loop {
            loop {
                let ch = self.next_char(pattern)?;
                self.state.buffer.push(ch);
                if ch == delim[0] {
                    break;
                }
            }

            for (i, &want) in delim.iter().enumerate().skip(1) {
                let ch = self.next_char(pattern)?;
                if ch != want {
                    let mut back = delim[1..i].to_vec();
                    back.push(ch);
                    self.input.unread_all(&back)?;
                    continue 'scan;
                }
            }

            self.state.buffer.push_str(&pattern[delim[0].len_utf8()..]);
            return Ok(());
        }
    }

    /// Read a name: first character a letter, `_`, `:` or `*`; the rest may
    /// also be digits, `.` or `-`. The character after the name is pushed
    /// back.
    fn name_token(&mut self) -> ParseResult<String> {
        let ch = self.next_char("a name")?;
        if !is_name_start(ch) {
            return Err(self.syntax(format!("Invalid initial name char: {ch}")));
        }

        let start = self.state.buffer.len();
        self.state.buffer.push(ch);
        loop {
            match self.input.read()? {
                Some(ch) if is_name_char(ch) => self.state.buffer.push(ch),
                Some(ch) => {
                    self.input.unread(ch)?;
                    break;
                }
                None => break,
            }
        }

        Ok(self.state.buffer.slice(start, self.state.buffer.len()).to_string())
    }

    /// Try to consume `expected`; on mismatch everything read is pushed back.
    fn try_read(&mut self, expected: &str) -> ParseResult<bool> {
        let mut read = Vec::with_capacity(expected.len());
        for want in expected.chars() {
            match self.input.read()? {
                Some(ch) => {
                    read.push(ch);
                    if ch != want {
                        self.input.unread_all(&read)?;
                        return Ok(false);
                    }
                }
                None => {
                    self.input.unread_all(&read)?;
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// The next character must be `required`.
    fn require(&mut self, required: char) -> ParseResult<()> {
        match self.input.read()? {
            Some(ch) if ch == required => {
                self.state.buffer.push(ch);
                Ok(())
            }
            Some(ch) => {
                self.input.unread(ch)?;
                Err(self.syntax(format!("Character '{required}' not found: {ch}")))
            }
            None => Err(self.unexpected_eof(&format!("'{required}'"))),
        }
    }

    fn require_str(&mut self, required: &str) -> ParseResult<()> {
        for ch in required.chars() {
            self.require(ch)?;
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) -> ParseResult<()> {
        while let Some(ch) = self.input.read()? {
            if !ch.is_whitespace() {
                self.input.unread(ch)?;
                break;
            }
        }
        Ok(())
    }

    /// Like `skip_whitespace`, but keeps the whitespace in the buffer.
    fn parse_whitespace(&mut self) -> ParseResult<()> {
        while let Some(ch) = self.input.read()? {
            if !ch.is_whitespace() {
                self.input.unread(ch)?;
                break;
            }
            self.state.buffer.push(ch);
        }
        Ok(())
    }

    fn next_char(&mut self, expected: &str) -> ParseResult<char> {
        match self.input.read()? {
            Some(ch) => Ok(ch),
            None => Err(self.unexpected_eof(expected)),
        }
    }

    fn emit(&mut self, start: usize, kind: TokenKind, name: Option<String>) -> bool {
        self.state.buffer.mark(start);
        self.state.kind = Some(kind);
        self.state.name = name;
        true
    }

    /// Leave a suppressed construct in the plain text.
    fn fold(&self, kind: TokenKind) -> bool {
        debug!(%kind, line = self.line_number(), "Folding suppressed construct into text");
        false
    }

    fn syntax(&self, message: String) -> ParseError {
        ParseError::Syntax {
            line: self.line_number(),
            message,
        }
    }

    fn unexpected_eof(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedEof {
            line: self.line_number(),
            expected: expected.to_string(),
        }
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, '_' | ':' | '*')
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | ':' | '.' | '*' | '-')
}

/// Tokenize a string with the default configuration.
pub fn tokenize(input: &str) -> ParseResult<Vec<Token>> {
    tokenize_with(input, TokenizerConfig::default())
}

/// Tokenize a string, collecting every token.
pub fn tokenize_with(input: &str, config: TokenizerConfig) -> ParseResult<Vec<Token>> {
    let mut tokenizer = Tokenizer::with_config(StrSource::new(input), config);
    let mut tokens = Vec::new();
    while tokenizer.next_token()? {
        tokens.push(tokenizer.snapshot());
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<Option<TokenKind>> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tag() {
        let tokens = tokenize("<div></div>").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![Some(TokenKind::StartTag), Some(TokenKind::EndTag)]
        );
        assert_eq!(tokens[0].name.as_deref(), Some("div"));
        assert_eq!(tokens[0].content.as_deref(), Some("<div>"));
        assert_eq!(tokens[1].name.as_deref(), Some("div"));
        assert_eq!(tokens[1].content.as_deref(), Some("</div>"));
    }

    #[test]
    fn test_empty_tag() {
        for input in ["<br/>", "<br />"] {
            let tokens = tokenize(input).unwrap();
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].kind, Some(TokenKind::EmptyTag));
            assert_eq!(tokens[0].name.as_deref(), Some("br"));
            assert_eq!(tokens[0].content.as_deref(), Some(input));
        }
    }

    #[test]
    fn test_attribute_order() {
        let mut tokenizer = Tokenizer::from_text(
            r#"<*Date Year="${year}" Month="${month}" Day="${day}" InvalidValue="" />"#,
        );
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), Some(TokenKind::EmptyTag));
        assert_eq!(tokenizer.name(), Some("*Date"));

        let names: Vec<&str> = tokenizer.attribute_names().collect();
        assert_eq!(names, vec!["Year", "Month", "Day", "InvalidValue"]);
        assert_eq!(tokenizer.attribute("Year"), Some("${year}"));
        assert_eq!(tokenizer.attribute("InvalidValue"), Some(""));
        assert!(!tokenizer.next_token().unwrap());
    }

    #[test]
    fn test_text_before_tag() {
        let mut tokenizer = Tokenizer::from_text("Hello &amp; $f(x)<b>");
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), Some(TokenKind::StartTag));
        assert_eq!(tokenizer.text(), "Hello &amp; $f(x)");
        assert_eq!(tokenizer.content(), Some("<b>"));
    }

    #[test]
    fn test_plain_text_only() {
        let mut tokenizer = Tokenizer::from_text("just text, no markup");
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), None);
        assert_eq!(tokenizer.content(), None);
        assert_eq!(tokenizer.text(), "just text, no markup");
        assert!(!tokenizer.next_token().unwrap());
    }

    #[test]
    fn test_empty_input() {
        let mut tokenizer = Tokenizer::from_text("");
        assert!(!tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.text(), "");
    }

    #[test]
    fn test_trailing_text() {
        let tokens = tokenize("<a>tail").unwrap();
        assert_eq!(kinds(&tokens), vec![Some(TokenKind::StartTag), None]);
        assert_eq!(tokens[1].text, "tail");
    }

    #[test]
    fn test_comment() {
        let tokens = tokenize("<!-- x -->").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Some(TokenKind::Comment));
        assert_eq!(tokens[0].name, None);
        assert_eq!(tokens[0].content.as_deref(), Some("<!-- x -->"));
    }

    #[test]
    fn test_comment_partial_delimiters() {
        let input = "<!-- a-b -- c -->";
        let tokens = tokenize(&format!("{input}after")).unwrap();
        assert_eq!(tokens[0].content.as_deref(), Some(input));
        assert_eq!(tokens[1].text, "after");
    }

    #[test]
    fn test_comment_overlapping_end() {
        let tokens = tokenize("<!-- x --->").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content.as_deref(), Some("<!-- x --->"));
    }

    #[test]
    fn test_ignored_comment_is_text() {
        let config = TokenizerConfig::new().with_ignore_comments(true);
        let tokens = tokenize_with("a<!-- x -->b<c>", config).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Some(TokenKind::StartTag));
        assert_eq!(tokens[0].text, "a<!-- x -->b");
    }

    #[test]
    fn test_cdata() {
        let tokens = tokenize("<![CDATA[ <b>&</b> ]]]>").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Some(TokenKind::CData));
        assert_eq!(tokens[0].content.as_deref(), Some("<![CDATA[ <b>&</b> ]]]>"));
    }

    #[test]
    fn test_ignored_cdata_is_text() {
        let config = TokenizerConfig::new().with_ignore_cdata(true);
        let tokens = tokenize_with("<![CDATA[<x>]]>", config).unwrap();
        assert_eq!(kinds(&tokens), vec![None]);
        assert_eq!(tokens[0].text, "<![CDATA[<x>]]>");
    }

    #[test]
    fn test_processing_instruction() {
        let tokens = tokenize("<?xml   version=\"1.0\"?><?php?>").unwrap();
        assert_eq!(kinds(&tokens), vec![Some(TokenKind::Pi), Some(TokenKind::Pi)]);
        assert_eq!(tokens[0].name.as_deref(), Some("xml"));
        assert_eq!(tokens[0].content.as_deref(), Some("<?xml version=\"1.0\"?>"));
        assert_eq!(tokens[1].name.as_deref(), Some("php"));
        assert_eq!(tokens[1].content.as_deref(), Some("<?php?>"));
    }

    #[test]
    fn test_ignored_pi_is_text() {
        let config = TokenizerConfig::new().with_ignore_pi(true);
        let tokens = tokenize_with("<?app body?>", config).unwrap();
        assert_eq!(kinds(&tokens), vec![None]);
        assert_eq!(tokens[0].text, "<?app body?>");
    }

    #[test]
    fn test_ignored_pi_keeps_separator_verbatim() {
        let config = TokenizerConfig::new().with_ignore_pi(true);
        let input = "<?app\n   body?>x";
        let tokens = tokenize_with(input, config).unwrap();
        assert_eq!(kinds(&tokens), vec![None]);
        assert_eq!(tokens[0].text, input);

        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[0].content.as_deref(), Some("<?app body?>"));
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_pi_requires_whitespace() {
        let err = tokenize("<?xml!?>").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { ref message, .. } if message == "Whitespace required: !"));
    }

    #[test]
    fn test_unrecognised_declaration_is_text() {
        let tokens = tokenize("<!DOCTYPE html><p>").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, Some(TokenKind::StartTag));
        assert_eq!(tokens[0].text, "<!DOCTYPE html>");
    }

    #[test]
    fn test_end_tag_ignores_trailing_junk() {
        let tokens = tokenize("</a  foo bar>").unwrap();
        assert_eq!(tokens[0].kind, Some(TokenKind::EndTag));
        assert_eq!(tokens[0].name.as_deref(), Some("a"));
        assert_eq!(tokens[0].content.as_deref(), Some("</a  foo bar>"));
    }

    #[test]
    fn test_unquoted_attributes() {
        let tokens = tokenize("<a b=c d = 'e' f=g/>").unwrap();
        let token = &tokens[0];
        assert_eq!(token.kind, Some(TokenKind::EmptyTag));
        assert_eq!(token.attribute("b"), Some("c"));
        assert_eq!(token.attribute("d"), Some("e"));
        assert_eq!(token.attribute("f"), Some("g"));
    }

    #[test]
    fn test_escaped_quote() {
        let tokens = tokenize(r#"<a name="a\"b" path="\/x">"#).unwrap();
        assert_eq!(tokens[0].attribute("name"), Some(r#"a\"b"#));
        assert_eq!(tokens[0].attribute("path"), Some(r"\/x"));
    }

    #[test]
    fn test_newline_in_attribute_value() {
        let err = tokenize("<p>\n<a b=\"x\ny\">").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("Newline in attribute value"));
    }

    #[test]
    fn test_slash_in_quoted_value() {
        let err = tokenize(r#"<a href="http://x">"#).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_attributes() {
        let mut tokenizer = Tokenizer::from_text("<a x='1' x='2'>");
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.attributes().len(), 2);
        assert_eq!(tokenizer.attribute("x"), Some("2"));
    }

    #[test]
    fn test_state_does_not_leak() {
        let mut tokenizer = Tokenizer::from_text("<a x=\"1\">text<!--c-->");
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.attributes().len(), 1);

        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), Some(TokenKind::Comment));
        assert_eq!(tokenizer.name(), None);
        assert!(tokenizer.attributes().is_empty());
        assert_eq!(tokenizer.attribute("x"), None);
        assert_eq!(tokenizer.text(), "text");
        assert_eq!(tokenizer.content(), Some("<!--c-->"));
    }

    #[test]
    fn test_toggle_between_tokens() {
        let mut tokenizer = Tokenizer::from_text("<!--a--><!--b-->");
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), Some(TokenKind::Comment));

        tokenizer.set_ignore_comments(true);
        assert!(tokenizer.ignores_comments());
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.kind(), None);
        assert_eq!(tokenizer.text(), "<!--b-->");
        assert!(!tokenizer.next_token().unwrap());
    }

    #[test]
    fn test_line_number() {
        let mut tokenizer = Tokenizer::from_text("one\ntwo\r\nthree<a>");
        assert_eq!(tokenizer.line_number(), 1);
        assert!(tokenizer.next_token().unwrap());
        assert_eq!(tokenizer.line_number(), 3);
    }

    #[test]
    fn test_name_characters() {
        let tokens = tokenize("<xsl:for-each.x_1 a:b=1></_x>").unwrap();
        assert_eq!(tokens[0].name.as_deref(), Some("xsl:for-each.x_1"));
        assert_eq!(tokens[0].attribute("a:b"), Some("1"));
        assert_eq!(tokens[1].name.as_deref(), Some("_x"));
    }

    #[test]
    fn test_invalid_name() {
        let err = tokenize("<1a>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax { line: 1, ref message } if message == "Invalid initial name char: 1"
        ));
    }

    #[test]
    fn test_malformed_comment_open() {
        let err = tokenize("<!-x").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax { ref message, .. } if message == "Character '-' not found: x"
        ));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("<!-- never closed -").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { ref expected, .. } if expected == "-->"));
    }

    #[test]
    fn test_bad_empty_tag() {
        let err = tokenize("<a/b>").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_attribute_without_value() {
        let err = tokenize("<input disabled>").unwrap_err();
        assert!(err.to_string().contains("Character '=' not found"));
    }

    #[test]
    fn test_determinism() {
        let input = "<r a='1'><!-- c --><![CDATA[d]]><?p q?></r>tail";
        assert_eq!(tokenize(input).unwrap(), tokenize(input).unwrap());
    }

    #[test]
    fn test_into_source() {
        let mut source = StrSource::new("<a>rest");
        {
            let mut tokenizer = Tokenizer::new(&mut source);
            assert!(tokenizer.next_token().unwrap());
        }
        assert_eq!(source.read_char().unwrap(), Some('r'));

        let tokenizer = Tokenizer::new(StrSource::new("x"));
        let mut source = tokenizer.into_source();
        assert_eq!(source.read_char().unwrap(), Some('x'));
    }
}
