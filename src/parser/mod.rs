//! Formula parser: tokenizer plus precedence-climbing grammar.
//!
//! Precedence, loosest to tightest: `<=>`, `=>`, `|`, `&`, then unary. The
//! biconditional and implication right-associate; disjunction and conjunction
//! left-associate. A successful parse consumes all input and returns the
//! *simplified* tree, not the raw parse.

mod lexer;

pub use lexer::ParseMode;

use lexer::{tokenize, Token, TokenKind};

use crate::error::{PropLogicError, Result};
use crate::formula::Formula;
use crate::rewrite::simplify;

/// Parse a formula in lenient mode.
pub fn parse(input: &str) -> Result<Formula> {
    parse_with_mode(input, ParseMode::Lenient)
}

/// Parse a formula in the given mode.
pub fn parse_with_mode(input: &str, mode: ParseMode) -> Result<Formula> {
    let tokens = tokenize(input, mode)?;
    let mut stream = TokenStream {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
    };
    let formula = stream.parse_iff()?;
    if let Some(token) = stream.peek() {
        return Err(PropLogicError::Parse {
            position: token.pos,
            message: format!("trailing input: unexpected {}", token.kind.describe()),
        });
    }
    Ok(simplify(&formula))
}

struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Byte length of the source, reported for unexpected end of input.
    end: usize,
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// `<=>` is right-associative: `A <=> B <=> C` is `A <=> (B <=> C)`.
    fn parse_iff(&mut self) -> Result<Formula> {
        let left = self.parse_implies()?;
        if matches!(self.peek_kind(), Some(TokenKind::Iff)) {
            self.advance();
            let right = self.parse_iff()?;
            return Ok(left.iff(right));
        }
        Ok(left)
    }

    /// `=>` is right-associative.
    fn parse_implies(&mut self) -> Result<Formula> {
        let left = self.parse_or()?;
        if matches!(self.peek_kind(), Some(TokenKind::Implies)) {
            self.advance();
            let right = self.parse_implies()?;
            return Ok(left.implies(right));
        }
        Ok(left)
    }

    /// `|` is left-associative.
    fn parse_or(&mut self) -> Result<Formula> {
        let mut left = self.parse_and()?;
        while matches!(self.peek_kind(), Some(TokenKind::Or)) {
            self.advance();
            let right = self.parse_and()?;
            left = left.or(right);
        }
        Ok(left)
    }

    /// `&` is left-associative.
    fn parse_and(&mut self) -> Result<Formula> {
        let mut left = self.parse_unary()?;
        while matches!(self.peek_kind(), Some(TokenKind::And)) {
            self.advance();
            let right = self.parse_unary()?;
            left = left.and(right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Formula> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => {
                return Err(PropLogicError::Parse {
                    position: self.end,
                    message: "unexpected end of input".to_string(),
                })
            }
        };
        match token.kind {
            TokenKind::Not => {
                self.advance();
                Ok(self.parse_unary()?.negate())
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_iff()?;
                match self.peek() {
                    Some(next) if next.kind == TokenKind::RParen => {
                        self.advance();
                        Ok(inner.group())
                    }
                    Some(next) => Err(PropLogicError::Parse {
                        position: next.pos,
                        message: format!("expected ')', found {}", next.kind.describe()),
                    }),
                    None => Err(PropLogicError::Parse {
                        position: self.end,
                        message: "unbalanced parentheses: expected ')'".to_string(),
                    }),
                }
            }
            TokenKind::True => {
                self.advance();
                Ok(Formula::True)
            }
            TokenKind::False => {
                self.advance();
                Ok(Formula::False)
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Formula::var(name))
            }
            other => Err(PropLogicError::Parse {
                position: token.pos,
                message: format!("unexpected {}", other.describe()),
            }),
        }
    }
}
