use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::Character => "character",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
        };
        f.write_str(name)
    }
}

/// A lexed token. `literal` is the exact source slice, quotes and escapes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, literal: &'a str, offset: usize) -> Self {
        Self {
            kind,
            literal,
            offset,
        }
    }

    /// Byte offset one past the last character of this token.
    pub fn end(&self) -> usize {
        self.offset + self.literal.len()
    }
}
