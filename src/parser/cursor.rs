use crate::token::{Token, TokenKind};

/// Position over a token slice with bounded lookahead.
pub(crate) struct TokenCursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> TokenCursor<'t, 'a> {
    pub(crate) fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    pub(crate) fn has(&self, offset: usize) -> bool {
        self.index + offset < self.tokens.len()
    }

    pub(crate) fn get(&self, offset: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.index + offset)
    }

    /// The most recently consumed token.
    pub(crate) fn previous(&self) -> Option<&'t Token<'a>> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    pub(crate) fn advance(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    pub(crate) fn peek_literal(&self, literal: &str) -> bool {
        self.get(0).is_some_and(|token| token.literal == literal)
    }

    pub(crate) fn peek_kind(&self, kind: TokenKind) -> bool {
        self.get(0).is_some_and(|token| token.kind == kind)
    }

    pub(crate) fn match_literal(&mut self, literal: &str) -> bool {
        if self.peek_literal(literal) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> Option<&'t Token<'a>> {
        if self.peek_kind(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Offset for diagnostics: the current token, or the end of the last one
    /// once the stream is exhausted.
    pub(crate) fn error_position(&self) -> usize {
        match (self.get(0), self.previous()) {
            (Some(token), _) => token.offset,
            (None, Some(previous)) => previous.end(),
            (None, None) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_literal_and_kind() {
        let tokens = [
            Token::new(TokenKind::Identifier, "LET", 0),
            Token::new(TokenKind::Identifier, "x", 4),
        ];
        let mut cursor = TokenCursor::new(&tokens);
        assert!(!cursor.match_literal("DEF"));
        assert!(cursor.match_literal("LET"));
        assert_eq!(
            cursor.match_kind(TokenKind::Identifier).map(|t| t.literal),
            Some("x")
        );
        assert!(!cursor.has(0));
        assert_eq!(cursor.error_position(), 5);
    }

    #[test]
    fn error_position_defaults_to_zero_without_tokens() {
        let cursor = TokenCursor::new(&[]);
        assert_eq!(cursor.error_position(), 0);
    }
}
