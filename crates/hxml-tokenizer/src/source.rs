//! Character sources.
//!
//! The tokenizer reads one character at a time from a [`CharSource`]. The
//! source belongs to the caller: the tokenizer never opens or closes it,
//! and hands it back through [`Tokenizer::into_source`].
//!
//! [`Tokenizer::into_source`]: crate::Tokenizer::into_source

use std::io::{self, BufRead};
use std::str::Chars;

/// A stream of characters.
pub trait CharSource {
    /// Read the next character, or `None` at end of stream.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

/// Characters of a borrowed string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Characters decoded from a UTF-8 reader, one line at a time.
///
/// Invalid UTF-8 surfaces as an [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
        }
    }

    /// Give the reader back to the caller.
    ///
    /// Characters already pulled into the line buffer are discarded.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
        }

        let ch = self.line[self.pos..].chars().next();
        if let Some(ch) = ch {
            self.pos += ch.len_utf8();
        }
        Ok(ch)
    }
}

/// Wraps a source and tracks the line currently being read.
///
/// `\n`, `\r` and `\r\n` each count as a single line break. Once the
/// inner source reports end of stream it is not polled again.
#[derive(Debug)]
pub struct LineCountingSource<S> {
    inner: S,
    breaks: usize,
    after_cr: bool,
    finished: bool,
}

impl<S: CharSource> LineCountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            breaks: 0,
            after_cr: false,
            finished: false,
        }
    }

    /// 1-based number of the line being read.
    pub fn line_number(&self) -> usize {
        self.breaks + 1
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: CharSource> CharSource for LineCountingSource<S> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.finished {
            return Ok(None);
        }

        let ch = self.inner.read_char()?;
        match ch {
            Some('\r') => {
                self.breaks += 1;
                self.after_cr = true;
            }
            Some('\n') => {
                if !self.after_cr {
                    self.breaks += 1;
                }
                self.after_cr = false;
            }
            Some(_) => self.after_cr = false,
            None => self.finished = true,
        }
        Ok(ch)
    }
}
