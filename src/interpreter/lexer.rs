use logos::Logos;

use crate::ast::Position;

/// The reserved words of the language. An identifier-shaped lexeme that
/// matches one of these becomes a [`TokenKind::Keyword`] token.
pub const KEYWORDS: &[&str] = &[
    "let",
    "for", "from", "to", "step",
    "while",
    "continue", "break",
    "if", "else",
    "fun", "lambda",
    "return",
    "true", "false", "nil",
    "import", "as",
    "echo",
];

/// Identifier-shaped lexemes that are operators rather than keywords or
/// names.
pub const WORD_OPERATORS: &[&str] = &["or", "and", "not", "div", "mod"];

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved word such as `let` or `while`.
    Keyword,
    /// A user-chosen name.
    Identifier,
    /// A symbolic or word operator such as `+=` or `div`.
    Operator,
    /// A structural character: `( ) { } [ ] , ; :`.
    Punctuation,
    /// A numeric literal.
    Number,
    /// A string literal; the token value holds the decoded content.
    Str,
    /// The synthetic token closing every token stream.
    EndOfFile,
    /// Input the lexer could not accept. The value may carry a diagnostic
    /// tail.
    Illegal,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Number => "number",
            Self::Str => "string",
            Self::EndOfFile => "end of file",
            Self::Illegal => "illegal",
        };
        write!(f, "{name}")
    }
}

/// A lexical token: its kind, its text and where it started.
///
/// For string tokens the value is the decoded content, with escape
/// sequences already replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// The token text.
    pub value: String,
    /// The 1-indexed position of the token's first character.
    pub position: Position,
}

/// The raw lexeme classes recognized by the generated lexer. These are
/// reclassified into [`TokenKind`]s by [`tokenize`]: words split into
/// keywords, word operators and identifiers, and the two quote styles
/// collapse into one string kind.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    /// `# comments run to the end of the line.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Keywords, identifiers and word operators.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    /// Number literals such as `42`, `1.5` or `1.`
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,
    /// String literals in either quote style. May span lines.
    #[regex(r#""([^"\\]|\\[\s\S])*""#, priority = 4)]
    #[regex(r"'([^'\\]|\\[\s\S])*'", priority = 4)]
    Quoted,
    /// A string opened but never closed before the end of input.
    #[regex(r#""([^"\\]|\\[\s\S])*"#, priority = 2)]
    #[regex(r"'([^'\\]|\\[\s\S])*", priority = 2)]
    Unterminated,
    /// All symbolic operators. Two-character forms win over their
    /// one-character prefixes because the longest match is taken.
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("^=")]
    #[token("=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("<")]
    #[token(">")]
    #[token("^")]
    Operator,
    /// A lone `!`; only meaningful with a following `=`.
    #[token("!")]
    Bang,
    /// Structural single characters.
    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    Punctuation,
}

/// Maps byte offsets to 1-indexed line/column pairs.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        Position::new(line, column)
    }
}

/// Tokenizes a whole source text.
///
/// The result always ends with exactly one [`TokenKind::EndOfFile`] token.
/// The lexer never fails: unacceptable input becomes
/// [`TokenKind::Illegal`] tokens and the stream continues after them.
///
/// # Example
/// ```
/// use toylang::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("let x = 1;");
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![
///     TokenKind::Keyword,
///     TokenKind::Identifier,
///     TokenKind::Operator,
///     TokenKind::Number,
///     TokenKind::Punctuation,
///     TokenKind::EndOfFile,
/// ]);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let position = index.position(lexer.span().start);
        let slice = lexer.slice();
        let token = match raw {
            Ok(RawToken::Word) => classify_word(slice, position),
            Ok(RawToken::Number) => Token {
                kind: TokenKind::Number,
                value: slice.to_string(),
                position,
            },
            Ok(RawToken::Quoted) => Token {
                kind: TokenKind::Str,
                value: decode_string(&slice[1..slice.len() - 1]),
                position,
            },
            Ok(RawToken::Unterminated) => Token {
                kind: TokenKind::Illegal,
                value: format!("{} (string is never closed)", decode_string(&slice[1..])),
                position,
            },
            Ok(RawToken::Operator) => Token {
                kind: TokenKind::Operator,
                value: slice.to_string(),
                position,
            },
            Ok(RawToken::Punctuation) => Token {
                kind: TokenKind::Punctuation,
                value: slice.to_string(),
                position,
            },
            // a comment never reaches here, it is skipped by the lexer
            Ok(RawToken::Bang | RawToken::Comment) | Err(()) => Token {
                kind: TokenKind::Illegal,
                value: slice.to_string(),
                position,
            },
        };
        tokens.push(token);
    }

    tokens.push(Token {
        kind: TokenKind::EndOfFile,
        value: String::new(),
        position: index.position(source.len()),
    });
    tokens
}

/// Reclassifies an identifier-shaped lexeme into a keyword, a word
/// operator or a plain identifier.
fn classify_word(slice: &str, position: Position) -> Token {
    let kind = if KEYWORDS.contains(&slice) {
        TokenKind::Keyword
    } else if WORD_OPERATORS.contains(&slice) {
        TokenKind::Operator
    } else {
        TokenKind::Identifier
    };
    Token { kind, value: slice.to_string(), position }
}

/// Decodes the escape sequences of a string body. `\n` and `\t` become
/// control characters; any other escaped character stands for itself.
fn decode_string(body: &str) -> String {
    let mut output = String::with_capacity(body.len());
    let mut characters = body.chars();
    while let Some(ch) = characters.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match characters.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some(escaped) => output.push(escaped),
            None => output.push('\\'),
        }
    }
    output
}

/// A token stream with one token of lookahead.
///
/// The stream never runs out: once the end-of-file token is reached,
/// [`TokenStream::next`] keeps returning it.
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Tokenizes a source text into a fresh stream.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { tokens: tokenize(source), cursor: 0 }
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    /// True when the next token is the end-of-file token.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }
}
