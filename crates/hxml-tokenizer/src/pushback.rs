//! Bounded lookahead over a character source.

use crate::source::{CharSource, LineCountingSource};
use crate::{ParseError, ParseResult};

/// Number of characters that can be pushed back at once.
///
/// The longest delimiter scanned for is three characters, which needs at
/// most two slots; the rest is headroom for single-character peeks.
pub const PUSHBACK_CAPACITY: usize = 10;

/// Reader with a fixed-capacity stack of pushed-back characters.
///
/// Reads drain the stack first, most recently unread character first, then
/// fall through to the source.
#[derive(Debug)]
pub struct PushbackReader<S> {
    source: LineCountingSource<S>,
    stack: [char; PUSHBACK_CAPACITY],
    len: usize,
}

impl<S: CharSource> PushbackReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: LineCountingSource::new(source),
            stack: ['\0'; PUSHBACK_CAPACITY],
            len: 0,
        }
    }

    /// Read the next character, or `None` at end of stream.
    pub fn read(&mut self) -> ParseResult<Option<char>> {
        if self.len > 0 {
            self.len -= 1;
            return Ok(Some(self.stack[self.len]));
        }
        Ok(self.source.read_char()?)
    }

    /// Push one character back so it is the next one read.
    pub fn unread(&mut self, ch: char) -> ParseResult<()> {
        if self.len == PUSHBACK_CAPACITY {
            return Err(self.overflow());
        }
        self.stack[self.len] = ch;
        self.len += 1;
        Ok(())
    }

    /// Push a sequence back so that `chars[0]` is the next one read.
    ///
    /// Either the whole sequence fits or nothing is pushed.
    pub fn unread_all(&mut self, chars: &[char]) -> ParseResult<()> {
        if chars.len() > PUSHBACK_CAPACITY - self.len {
            return Err(self.overflow());
        }
        for &ch in chars.iter().rev() {
            self.stack[self.len] = ch;
            self.len += 1;
        }
        Ok(())
    }

    /// 1-based line of the source currently being read.
    ///
    /// Pushing characters back does not move the line counter.
    pub fn line_number(&self) -> usize {
        self.source.line_number()
    }

    pub fn into_inner(self) -> S {
        self.source.into_inner()
    }

    fn overflow(&self) -> ParseError {
        ParseError::BufferOverflow {
            line: self.line_number(),
        }
    }
}
