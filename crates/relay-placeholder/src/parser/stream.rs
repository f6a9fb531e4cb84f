//! Token stream wrapper for the hand-written parser.

use crate::lexer::Token;

/// Token stream with single-token lookahead.
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check whether the current token has the same variant as `expected`.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(
            self.peek(),
            Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected)
        )
    }

    /// Consume the current token if it matches `expected`.
    ///
    /// The error carries no context; callers attach it (the offending
    /// expression or function) when mapping to an engine error.
    pub fn expect(&mut self, expected: &Token) -> Result<(), ()> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(())
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
