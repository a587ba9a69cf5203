//! Scanning window over raw player input.
//!
//! Argument resolution carves a window of the input for each spec, then
//! scans it with a [`Cursor`]. A cursor only ever moves forward and never
//! panics on mismatch.

/// A half-open range of byte offsets into the raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Start offset, inclusive.
    pub begin: usize,
    /// End offset, exclusive.
    pub end: usize,
}

impl Span {
    /// Creates a span covering `[begin, end)`.
    #[must_use]
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Whether the span covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// Whether the span contains the given offset.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.begin <= offset && offset < self.end
    }
}

/// A forward-only cursor over one window of the input string.
///
/// Offsets reported by the cursor are absolute positions in the full
/// input, not positions relative to the window.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `text[begin..end]`.
    #[must_use]
    pub fn over(text: &'a str, begin: usize, end: usize) -> Self {
        let end = end.min(text.len());
        Self {
            text,
            pos: begin.min(end),
            end,
        }
    }

    /// Current offset.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the cursor has consumed its whole window.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// The unconsumed text.
    #[must_use]
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..self.end]
    }

    /// Advances past leading whitespace.
    pub fn skip_spaces(&mut self) {
        while let Some(ch) = self.remainder().chars().next() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Finds a literal in the unconsumed text without advancing.
    ///
    /// Returns the absolute offset of the first occurrence.
    #[must_use]
    pub fn peek_literal(&self, literal: &str) -> Option<usize> {
        self.remainder().find(literal).map(|off| self.pos + off)
    }

    /// Takes the next whitespace-delimited word, advancing past it.
    pub fn take_word(&mut self) -> Option<(Span, &'a str)> {
        self.skip_spaces();
        if self.at_end() {
            return None;
        }
        let rest = self.remainder();
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let span = Span::new(self.pos, self.pos + len);
        self.pos = span.end;
        Some((span, &rest[..len]))
    }

    /// Takes everything left in the window, without trailing whitespace.
    pub fn take_remainder(&mut self) -> (Span, &'a str) {
        let text = self.remainder().trim_end();
        let span = Span::new(self.pos, self.pos + text.len());
        self.pos = self.end;
        (span, text)
    }
}
