//! Tokenizer configuration

use serde::{Deserialize, Serialize};

/// Controls which constructs are reported as tokens of their own.
///
/// A suppressed construct is still scanned to its end, but its text,
/// delimiters included, is folded into the surrounding plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Treat `<!-- ... -->` as plain text
    pub ignore_comments: bool,

    /// Treat `<![CDATA[ ... ]]>` as plain text
    pub ignore_cdata: bool,

    /// Treat `<?name ... ?>` as plain text
    pub ignore_pi: bool,
}

impl TokenizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    pub fn with_ignore_cdata(mut self, ignore: bool) -> Self {
        self.ignore_cdata = ignore;
        self
    }

    pub fn with_ignore_pi(mut self, ignore: bool) -> Self {
        self.ignore_pi = ignore;
        self
    }
}
