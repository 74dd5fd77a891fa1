use crate::token::{Token, TokenKind};

mod cursor;
pub mod error;

use cursor::CharCursor;
pub use error::{LexError, LexResult};

pub struct Lexer<'a> {
    cursor: CharCursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: CharCursor::new(input),
        }
    }

    /// Lexes the next token, skipping leading whitespace. `Ok(None)` marks the end of input.
    pub fn next_token(&mut self) -> LexResult<Option<Token<'a>>> {
        while self.cursor.advance_if(is_whitespace) {}
        self.cursor.skip();

        let Some(ch) = self.cursor.get(0) else {
            return Ok(None);
        };

        let token = match ch {
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
            '+' | '-' if self.cursor.peek_is(1, |c| c.is_ascii_digit()) => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            '\'' => self.read_character()?,
            '"' => self.read_string()?,
            _ => self.read_operator(),
        };
        Ok(Some(token))
    }

    fn read_identifier(&mut self) -> Token<'a> {
        self.cursor.advance();
        while self
            .cursor
            .advance_if(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {}
        self.cursor.emit(TokenKind::Identifier)
    }

    fn read_number(&mut self) -> Token<'a> {
        self.cursor.advance_if(|c| c == '+' || c == '-');
        while self.cursor.advance_if(|c| c.is_ascii_digit()) {}

        // A trailing '.' without a digit after it is not part of the number.
        if self.cursor.peek_is(0, |c| c == '.') && self.cursor.peek_is(1, |c| c.is_ascii_digit()) {
            self.cursor.advance();
            while self.cursor.advance_if(|c| c.is_ascii_digit()) {}
            return self.cursor.emit(TokenKind::Decimal);
        }
        self.cursor.emit(TokenKind::Integer)
    }

    fn read_character(&mut self) -> LexResult<Token<'a>> {
        self.cursor.advance(); // Consume opening quote
        let position = self.cursor.position();
        match self.cursor.get(0) {
            None => return Err(LexError::UnterminatedCharacter { position }),
            Some('\n' | '\r') => return Err(LexError::NewlineInLiteral { position }),
            Some('\'') => return Err(LexError::InvalidCharacter { position }),
            Some('\\') => {
                self.cursor.advance();
                self.read_escape(|position| LexError::UnterminatedCharacter { position })?;
            }
            Some(_) => self.cursor.advance(),
        }

        if self.cursor.advance_if(|c| c == '\'') {
            return Ok(self.cursor.emit(TokenKind::Character));
        }
        let position = self.cursor.position();
        if self.cursor.has(0) {
            Err(LexError::InvalidCharacter { position })
        } else {
            Err(LexError::UnterminatedCharacter { position })
        }
    }

    fn read_string(&mut self) -> LexResult<Token<'a>> {
        self.cursor.advance(); // Consume opening quote
        loop {
            let position = self.cursor.position();
            match self.cursor.get(0) {
                None => return Err(LexError::UnterminatedString { position }),
                Some('"') => {
                    self.cursor.advance();
                    return Ok(self.cursor.emit(TokenKind::String));
                }
                Some('\n' | '\r') => return Err(LexError::NewlineInLiteral { position }),
                Some('\\') => {
                    self.cursor.advance();
                    self.read_escape(|position| LexError::UnterminatedString { position })?;
                }
                Some(_) => self.cursor.advance(),
            }
        }
    }

    /// Consumes the character after a backslash.
    fn read_escape(&mut self, unterminated: impl Fn(usize) -> LexError) -> LexResult<()> {
        let position = self.cursor.position();
        if self.cursor.advance_if(is_escape) {
            Ok(())
        } else if self.cursor.has(0) {
            Err(LexError::InvalidEscape { position })
        } else {
            Err(unterminated(position))
        }
    }

    fn read_operator(&mut self) -> Token<'a> {
        if self.cursor.advance_if(|c| matches!(c, '<' | '>' | '!' | '=')) {
            self.cursor.advance_if(|c| c == '=');
        } else {
            self.cursor.advance();
        }
        self.cursor.emit(TokenKind::Operator)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{8}')
}

fn is_escape(c: char) -> bool {
    matches!(c, 'b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')
}

#[tracing::instrument(skip_all, fields(len = input.len()))]
pub fn tokenize(input: &str) -> LexResult<Vec<Token<'_>>> {
    if input.is_empty() {
        return Err(LexError::EmptyInput { position: 0 });
    }
    let tokens = Lexer::new(input).collect::<LexResult<Vec<_>>>()?;
    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
