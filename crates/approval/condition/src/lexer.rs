//! Lexer: tokenizes a condition string
//!
//! Produces a stream of tokens that the parser consumes.
//! Handles identifiers, string and number literals, the
//! comparison and logical operators, and parentheses.
//! Anything else (`.`, `=`, `;`, calls, ...) is rejected here.

use crate::errors::{ConditionError, ConditionResult};

/// A token produced by the lexer
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The raw text of the token (unescaped content for strings)
    pub text: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }
}

/// Token types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    True,
    False,

    // Identifiers and literals
    Identifier,
    StringLiteral,
    NumberLiteral,

    // Comparison
    Greater,
    Less,
    GreaterEq,
    LessEq,
    Equal,    // == or ===
    NotEqual, // != or !==

    // Logical
    And,
    Or,

    // Structural
    Minus,
    OpenParen,
    CloseParen,

    // End of input
    Eof,
}

impl TokenKind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Greater
                | Self::Less
                | Self::GreaterEq
                | Self::LessEq
                | Self::Equal
                | Self::NotEqual
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Identifier => write!(f, "identifier"),
            Self::StringLiteral => write!(f, "string literal"),
            Self::NumberLiteral => write!(f, "number"),
            Self::Greater => write!(f, ">"),
            Self::Less => write!(f, "<"),
            Self::GreaterEq => write!(f, ">="),
            Self::LessEq => write!(f, "<="),
            Self::Equal => write!(f, "=="),
            Self::NotEqual => write!(f, "!="),
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Minus => write!(f, "-"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer for the condition language
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer from input text
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> ConditionResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.pos >= self.input.len() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.col));
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> ConditionResult<Token> {
        let ch = self.input[self.pos];
        let line = self.line;
        let col = self.col;

        match ch {
            '(' => Ok(self.single(TokenKind::OpenParen, "(")),
            ')' => Ok(self.single(TokenKind::CloseParen, ")")),
            '-' => Ok(self.single(TokenKind::Minus, "-")),
            '>' if self.peek_at(1) == Some('=') => Ok(self.double(TokenKind::GreaterEq, ">=")),
            '>' => Ok(self.single(TokenKind::Greater, ">")),
            '<' if self.peek_at(1) == Some('=') => Ok(self.double(TokenKind::LessEq, "<=")),
            '<' => Ok(self.single(TokenKind::Less, "<")),
            '=' if self.peek_at(1) == Some('=') => {
                let token = self.double(TokenKind::Equal, "==");
                // `===` is accepted as a spelling of `==`
                if self.peek_at(0) == Some('=') {
                    self.advance();
                }
                Ok(token)
            }
            '!' if self.peek_at(1) == Some('=') => {
                let token = self.double(TokenKind::NotEqual, "!=");
                if self.peek_at(0) == Some('=') {
                    self.advance();
                }
                Ok(token)
            }
            '&' if self.peek_at(1) == Some('&') => Ok(self.double(TokenKind::And, "&&")),
            '|' if self.peek_at(1) == Some('|') => Ok(self.double(TokenKind::Or, "||")),
            '=' => Err(ConditionError::Parse {
                line,
                col,
                message: "Assignment is not supported; use '==' to compare".into(),
            }),
            '"' | '\'' => self.read_string_literal(ch),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                Ok(self.read_identifier_or_keyword())
            }
            _ => Err(ConditionError::Parse {
                line,
                col,
                message: format!("Unexpected character: '{}'", ch),
            }),
        }
    }

    fn single(&mut self, kind: TokenKind, text: &str) -> Token {
        let token = Token::new(kind, text, self.line, self.col);
        self.advance();
        token
    }

    fn double(&mut self, kind: TokenKind, text: &str) -> Token {
        let token = Token::new(kind, text, self.line, self.col);
        self.advance();
        self.advance();
        token
    }

    fn read_string_literal(&mut self, quote: char) -> ConditionResult<Token> {
        let line = self.line;
        let col = self.col;
        self.advance(); // skip opening quote

        let mut text = String::new();
        while self.pos < self.input.len() && self.input[self.pos] != quote {
            let ch = self.input[self.pos];
            if ch == '\\' {
                match self.peek_at(1) {
                    Some(next) if next == quote || next == '\\' => {
                        self.advance();
                        text.push(next);
                    }
                    _ => text.push(ch),
                }
            } else {
                text.push(ch);
            }
            self.advance();
        }

        if self.pos >= self.input.len() {
            return Err(ConditionError::Parse {
                line,
                col,
                message: "Unterminated string literal".into(),
            });
        }

        self.advance(); // skip closing quote
        Ok(Token::new(TokenKind::StringLiteral, text, line, col))
    }

    fn read_number(&mut self) -> ConditionResult<Token> {
        let line = self.line;
        let col = self.col;
        let mut text = self.read_digits();

        if self.peek_at(0) == Some('.') {
            if !self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                return Err(ConditionError::Parse {
                    line,
                    col,
                    message: format!("Malformed number: '{}.'", text),
                });
            }
            self.advance();
            text.push('.');
            text.push_str(&self.read_digits());
        }

        if self
            .peek_at(0)
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        {
            return Err(ConditionError::Parse {
                line,
                col,
                message: format!("Malformed number: '{}{}'", text, self.input[self.pos]),
            });
        }

        Ok(Token::new(TokenKind::NumberLiteral, text, line, col))
    }

    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            digits.push(self.input[self.pos]);
            self.advance();
        }
        digits
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let line = self.line;
        let col = self.col;
        let mut text = String::new();

        while self.pos < self.input.len()
            && (self.input[self.pos].is_ascii_alphanumeric()
                || self.input[self.pos] == '_'
                || self.input[self.pos] == '$')
        {
            text.push(self.input[self.pos]);
            self.advance();
        }

        let kind = match text.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, text, line, col)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_whitespace() {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }
}
