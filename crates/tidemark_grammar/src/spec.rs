//! Argument spec type registry.
//!
//! One [`ArgumentSpec`] describes a single typed token in a grammar
//! path: what shape it has, which destination its value lands under,
//! whether it may be absent, and what message its failure produces.

use crate::cursor::{Cursor, Span};
use crate::outcome::Value;

/// Resolution phase of an argument kind.
///
/// Anchors have a self-delimiting shape whose span can be located
/// independent of their neighbors, so they resolve first. Fill
/// arguments consume the gaps the anchors leave behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Bounded, self-delimiting shapes (delimiters, keywords, quotes).
    Anchor,
    /// Variable-length shapes resolved between the anchors.
    Fill,
}

/// The shape of one argument token.
#[derive(Clone, Debug)]
pub enum ArgKind {
    /// An integer, optionally bounded.
    Number {
        /// Smallest accepted value, if any.
        min: Option<i64>,
        /// Largest accepted value, if any.
        max: Option<i64>,
    },
    /// A single whitespace-delimited word.
    Word,
    /// A literal word, with alternates, at a word boundary. Non-binding.
    Keyword {
        /// Accepted spellings, tried in order.
        names: Vec<String>,
    },
    /// A literal run of delimiter characters. Non-binding.
    Symbols {
        /// The delimiter text to locate.
        literal: String,
    },
    /// A double-quoted string; binds the text between the quotes.
    Quoted,
    /// Everything left in the window.
    Remainder,
}

impl ArgKind {
    /// The phase in which this kind resolves.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Keyword { .. } | Self::Symbols { .. } | Self::Quoted => Phase::Anchor,
            Self::Number { .. } | Self::Word | Self::Remainder => Phase::Fill,
        }
    }

    /// Whether a successful resolution binds a value under the spec's
    /// destination name.
    #[must_use]
    pub fn binds(&self) -> bool {
        !matches!(self, Self::Keyword { .. } | Self::Symbols { .. })
    }

    /// Short noun used in default failure messages.
    fn noun(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Word => "word",
            Self::Keyword { .. } => "keyword",
            Self::Symbols { .. } => "delimiter",
            Self::Quoted => "quoted text",
            Self::Remainder => "text",
        }
    }
}

/// One typed token descriptor within a grammar path.
#[derive(Clone, Debug)]
pub struct ArgumentSpec {
    pub(crate) kind: ArgKind,
    pub(crate) dest: String,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) message: Option<String>,
}

impl ArgumentSpec {
    fn new(kind: ArgKind, dest: impl Into<String>) -> Self {
        Self {
            kind,
            dest: dest.into(),
            required: true,
            default: None,
            message: None,
        }
    }

    /// An integer argument, accepting 1 and above by default.
    #[must_use]
    pub fn number(dest: impl Into<String>) -> Self {
        Self::new(
            ArgKind::Number {
                min: Some(1),
                max: None,
            },
            dest,
        )
    }

    /// A single-word argument.
    #[must_use]
    pub fn word(dest: impl Into<String>) -> Self {
        Self::new(ArgKind::Word, dest)
    }

    /// A literal keyword (e.g. `for`, `into`). Add alternate spellings
    /// with [`ArgumentSpec::alias`].
    #[must_use]
    pub fn keyword(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ArgKind::Keyword {
                names: vec![name.clone()],
            },
            name,
        )
    }

    /// A literal delimiter (e.g. `d`, `|`, `=`).
    #[must_use]
    pub fn symbols(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        Self::new(
            ArgKind::Symbols {
                literal: literal.clone(),
            },
            literal,
        )
    }

    /// A double-quoted string argument.
    #[must_use]
    pub fn quoted(dest: impl Into<String>) -> Self {
        Self::new(ArgKind::Quoted, dest)
    }

    /// An argument capturing everything left on the line.
    #[must_use]
    pub fn remainder(dest: impl Into<String>) -> Self {
        Self::new(ArgKind::Remainder, dest)
    }

    /// Marks the argument as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the value bound when the argument is absent.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Overrides the message shown when this spec causes the failure.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the lower bound of a number argument. `None` lifts it.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<Option<i64>>) -> Self {
        if let ArgKind::Number { min: bound, .. } = &mut self.kind {
            *bound = min.into();
        }
        self
    }

    /// Sets the upper bound of a number argument. `None` lifts it.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<Option<i64>>) -> Self {
        if let ArgKind::Number { max: bound, .. } = &mut self.kind {
            *bound = max.into();
        }
        self
    }

    /// Adds an alternate spelling to a keyword argument.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        if let ArgKind::Keyword { names } = &mut self.kind {
            names.push(name.into());
        }
        self
    }

    /// The destination name.
    #[must_use]
    pub fn dest(&self) -> &str {
        &self.dest
    }

    /// The argument's shape.
    #[must_use]
    pub fn kind(&self) -> &ArgKind {
        &self.kind
    }

    /// Whether the argument must appear in the input.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Renders the spec for usage strings.
    #[must_use]
    pub fn format(&self) -> String {
        let body = match &self.kind {
            ArgKind::Symbols { literal } => literal.clone(),
            ArgKind::Keyword { names } => names.join("/"),
            _ => format!("<{}>", self.dest),
        };
        if self.required {
            body
        } else {
            format!("[{body}]")
        }
    }

    /// The message produced when this spec causes a failure, from the
    /// override when set, otherwise a per-kind default.
    pub(crate) fn failure_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match &self.kind {
            ArgKind::Symbols { literal } => {
                format!("You forgot to specify {literal}.")
            }
            ArgKind::Keyword { names } => {
                format!("You forgot to specify {}.", names.join("/"))
            }
            kind => format!("You should specify a {}.", kind.noun()),
        }
    }

    /// Tries to resolve this spec inside the cursor's window.
    ///
    /// On success, returns the covered span and the bound value (`None`
    /// for non-binding kinds). On mismatch, returns `None` without
    /// committing anything.
    pub(crate) fn resolve(&self, cursor: &mut Cursor<'_>) -> Option<(Span, Option<Value>)> {
        match &self.kind {
            ArgKind::Number { min, max } => {
                let (span, word) = cursor.take_word()?;
                let value: i64 = word.parse().ok()?;
                if min.is_some_and(|bound| value < bound) {
                    return None;
                }
                if max.is_some_and(|bound| value > bound) {
                    return None;
                }
                Some((span, Some(Value::Number(value))))
            }
            ArgKind::Word => {
                let (span, word) = cursor.take_word()?;
                Some((span, Some(Value::Text(word.to_string()))))
            }
            ArgKind::Symbols { literal } => {
                let pos = cursor.peek_literal(literal)?;
                Some((Span::new(pos, pos + literal.len()), None))
            }
            ArgKind::Keyword { names } => {
                let base = cursor.pos();
                let text = cursor.remainder();
                for name in names {
                    let mut from = 0;
                    while let Some(off) = text[from..].find(name.as_str()) {
                        let start = from + off;
                        let end = start + name.len();
                        let before_ok = text[..start]
                            .chars()
                            .next_back()
                            .is_none_or(char::is_whitespace);
                        let after_ok =
                            text[end..].chars().next().is_none_or(char::is_whitespace);
                        if before_ok && after_ok {
                            return Some((Span::new(base + start, base + end), None));
                        }
                        from = end;
                    }
                }
                None
            }
            ArgKind::Quoted => {
                let base = cursor.pos();
                let text = cursor.remainder();
                let open = text.find('"')?;
                let inner = &text[open + 1..];
                let close = inner.find('"')?;
                let span = Span::new(base + open, base + open + 1 + close + 1);
                Some((span, Some(Value::Text(inner[..close].to_string()))))
            }
            ArgKind::Remainder => {
                cursor.skip_spaces();
                if cursor.at_end() {
                    return None;
                }
                let (span, text) = cursor.take_remainder();
                Some((span, Some(Value::Text(text.to_string()))))
            }
        }
    }
}
