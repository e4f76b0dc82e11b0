//! Top-level argument splitting for `return` statements.
//!
//! The tokenizer walks the text after the `return ` keyword once, tracking
//! parenthesis depth so that commas nested inside calls never split an
//! argument. Go string, raw string, and rune literals are stepped over
//! without affecting depth or splitting, and a trailing `//` line comment is
//! set aside instead of being folded into the last argument.
//!
//! Tokenizing is total: malformed input still yields tokens, and
//! [`ArgumentList::is_balanced`] reports whether they can be trusted.

/// Ordered, trimmed argument tokens taken from one `return` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    tokens: Vec<String>,
    comment: Option<String>,
    balanced: bool,
}

impl ArgumentList {
    /// Returns the trimmed tokens in source order.
    ///
    /// There is always at least one token; an empty argument text produces a
    /// single empty token.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the number of tokens.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` when there are no tokens.
    ///
    /// Lists built by [`tokenize`] always hold at least one token.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the trailing `//` comment, if the argument text carried one.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns `true` when every parenthesis and literal was closed.
    ///
    /// A list is unbalanced when depth finished above zero, dropped below
    /// zero at any point, or a literal was still open at end of input.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// Joins the tokens with `", "`, omitting any trailing comment.
    #[must_use]
    pub fn join(&self) -> String {
        self.tokens.join(", ")
    }

    /// Consumes the list, returning the tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

/// Splits `args` into top-level, comma-separated, trimmed tokens.
///
/// # Example
///
/// ```
/// use errwrap_engine::tokenize;
///
/// let arguments = tokenize("f(a, b), c");
/// assert_eq!(arguments.tokens(), ["f(a, b)", "c"]);
/// ```
#[must_use]
pub fn tokenize(args: &str) -> ArgumentList {
    let mut scanner = Scanner::default();
    let mut chars = args.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let opens_comment = scanner.literal.is_none()
            && ch == '/'
            && chars.peek().is_some_and(|&(_, next)| next == '/');
        if opens_comment {
            scanner.comment = args.get(offset..).map(|rest| rest.trim_end().to_owned());
            break;
        }
        scanner.push(ch);
    }

    scanner.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Interpreted,
    Raw,
    Rune,
}

impl Literal {
    const fn opened_by(ch: char) -> Option<Self> {
        match ch {
            '"' => Some(Self::Interpreted),
            '`' => Some(Self::Raw),
            '\'' => Some(Self::Rune),
            _ => None,
        }
    }

    const fn closer(self) -> char {
        match self {
            Self::Interpreted => '"',
            Self::Raw => '`',
            Self::Rune => '\'',
        }
    }

    // Raw strings have no escape sequences.
    const fn has_escapes(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

#[derive(Debug, Default)]
struct Scanner {
    tokens: Vec<String>,
    current: String,
    depth: isize,
    underflowed: bool,
    literal: Option<Literal>,
    escaped: bool,
    comment: Option<String>,
}

impl Scanner {
    fn push(&mut self, ch: char) {
        if let Some(literal) = self.literal {
            self.push_literal(literal, ch);
            return;
        }

        match ch {
            ',' if self.depth == 0 => {
                self.tokens.push(std::mem::take(&mut self.current));
                return;
            }
            '(' => self.depth = self.depth.saturating_add(1),
            ')' => {
                self.depth = self.depth.saturating_sub(1);
                if self.depth < 0 {
                    self.underflowed = true;
                }
            }
            _ => self.literal = Literal::opened_by(ch),
        }

        self.current.push(ch);
    }

    fn push_literal(&mut self, literal: Literal, ch: char) {
        self.current.push(ch);

        if self.escaped {
            self.escaped = false;
        } else if ch == '\\' && literal.has_escapes() {
            self.escaped = true;
        } else if ch == literal.closer() {
            self.literal = None;
        }
    }

    fn finish(mut self) -> ArgumentList {
        let balanced = self.depth == 0 && !self.underflowed && self.literal.is_none();
        self.tokens.push(self.current);

        ArgumentList {
            tokens: self
                .tokens
                .iter()
                .map(|token| token.trim().to_owned())
                .collect(),
            comment: self.comment,
            balanced,
        }
    }
}
