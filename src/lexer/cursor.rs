use crate::token::{Token, TokenKind};

/// Position over raw source text with bounded lookahead.
///
/// `start` marks the first byte of the token being built; `emit` slices
/// everything consumed since then and resets the mark.
pub(crate) struct CharCursor<'a> {
    input: &'a str,
    position: usize,
    start: usize,
}

impl<'a> CharCursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            start: 0,
        }
    }

    pub(crate) fn has(&self, offset: usize) -> bool {
        self.get(offset).is_some()
    }

    pub(crate) fn get(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    pub(crate) fn peek_is(&self, offset: usize, predicate: impl Fn(char) -> bool) -> bool {
        self.get(offset).is_some_and(predicate)
    }

    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.get(0) {
            self.position += c.len_utf8();
        }
    }

    /// Advances past the current character when it satisfies `predicate`.
    pub(crate) fn advance_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        if self.peek_is(0, predicate) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip(&mut self) {
        self.start = self.position;
    }

    pub(crate) fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(kind, &self.input[self.start..self.position], self.start);
        self.skip();
        token
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_slice_since_last_skip() {
        let mut cursor = CharCursor::new("ab cd");
        cursor.advance();
        cursor.advance();
        let token = cursor.emit(TokenKind::Identifier);
        assert_eq!(token.literal, "ab");
        assert_eq!(token.offset, 0);

        cursor.advance();
        cursor.skip();
        cursor.advance();
        cursor.advance();
        let token = cursor.emit(TokenKind::Identifier);
        assert_eq!(token.literal, "cd");
        assert_eq!(token.offset, 3);
        assert!(!cursor.has(0));
    }

    #[test]
    fn looks_ahead_without_consuming() {
        let cursor = CharCursor::new("-1");
        assert_eq!(cursor.get(0), Some('-'));
        assert_eq!(cursor.get(1), Some('1'));
        assert_eq!(cursor.get(2), None);
        assert_eq!(cursor.position(), 0);
    }
}
