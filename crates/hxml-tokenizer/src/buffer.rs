//! Accumulator for the characters consumed while producing one token.

/// Text consumed since the last token, split by an optional boundary.
///
/// Everything before the boundary is plain text; everything from the
/// boundary on is the recognised construct, delimiters included. Without a
/// boundary the whole buffer is plain text.
#[derive(Debug, Default, Clone)]
pub struct TokenBuffer {
    data: String,
    boundary: Option<usize>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) {
        self.data.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Current length, usable as an index for [`slice`](Self::slice).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Set the boundary between plain text and a construct.
    pub fn mark(&mut self, index: usize) {
        self.boundary = Some(index);
    }

    pub fn boundary(&self) -> Option<usize> {
        self.boundary
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.boundary = None;
    }

    /// Text between two indices previously returned by [`len`](Self::len).
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.data[start..end]
    }

    /// Plain text preceding the construct, or the whole buffer if there is
    /// no construct.
    pub fn text(&self) -> &str {
        match self.boundary {
            Some(boundary) => &self.data[..boundary],
            None => &self.data,
        }
    }

    /// Literal text of the recognised construct.
    pub fn content(&self) -> Option<&str> {
        self.boundary.map(|boundary| &self.data[boundary..])
    }
}
