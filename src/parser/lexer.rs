//! Tokenizer for the formula grammar.
//!
//! Two modes: lenient (the default) accepts ASCII synonyms, whole-word
//! keywords, and Unicode connectives; strict accepts only the canonical ASCII
//! symbol set, so keywords lex as plain identifiers.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::satisfy,
    combinator::{map, recognize, value},
    sequence::pair,
    IResult,
};

use crate::error::{PropLogicError, Result};

/// Which surface syntax the lexer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// ASCII synonyms (`&&`, `->`, ...), keywords (`AND`, `THEN`, ...),
    /// Unicode connectives, and `TRUE`/`FALSE` constants.
    #[default]
    Lenient,
    /// Only `! & | => <=> ( )` and identifiers. `TRUE` is a variable
    /// literally named "TRUE".
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    True,
    False,
    Not,
    And,
    Or,
    Implies,
    Iff,
    LParen,
    RParen,
}

impl TokenKind {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::True => "'TRUE'".to_string(),
            TokenKind::False => "'FALSE'".to_string(),
            TokenKind::Not => "'!'".to_string(),
            TokenKind::And => "'&'".to_string(),
            TokenKind::Or => "'|'".to_string(),
            TokenKind::Implies => "'=>'".to_string(),
            TokenKind::Iff => "'<=>'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
        }
    }
}

/// A token with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Split the input into tokens, reporting the byte offset of any character
/// that starts no token in the given mode.
pub fn tokenize(input: &str, mode: ParseMode) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        let pos = input.len() - rest.len();
        let (next, kind) = lex_token(rest, mode).map_err(|_| PropLogicError::Parse {
            position: pos,
            message: format!(
                "unexpected character {:?}",
                rest.chars().next().unwrap_or(' ')
            ),
        })?;
        tokens.push(Token { kind, pos });
        rest = next.trim_start();
    }
    Ok(tokens)
}

fn lex_token(input: &str, mode: ParseMode) -> IResult<&str, TokenKind> {
    match mode {
        ParseMode::Lenient => alt((lex_symbol_lenient, lex_word_lenient))(input),
        ParseMode::Strict => alt((lex_symbol_strict, lex_ident_token))(input),
    }
}

fn lex_symbol_strict(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Iff, tag("<=>")),
        value(TokenKind::Implies, tag("=>")),
        value(TokenKind::Or, tag("|")),
        value(TokenKind::And, tag("&")),
        value(TokenKind::Not, tag("!")),
        value(TokenKind::LParen, tag("(")),
        value(TokenKind::RParen, tag(")")),
    ))(input)
}

fn lex_symbol_lenient(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(
            TokenKind::Iff,
            alt((tag("<=>"), tag("<->"), tag("↔"), tag("⇔"))),
        ),
        value(
            TokenKind::Implies,
            alt((tag("=>"), tag("->"), tag("→"), tag("⇒"))),
        ),
        value(TokenKind::Or, alt((tag("||"), tag("|"), tag("∨")))),
        value(TokenKind::And, alt((tag("&&"), tag("&"), tag("∧")))),
        value(TokenKind::Not, alt((tag("!"), tag("¬")))),
        value(TokenKind::LParen, tag("(")),
        value(TokenKind::RParen, tag(")")),
    ))(input)
}

/// Identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn lex_ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn lex_ident_token(input: &str) -> IResult<&str, TokenKind> {
    map(lex_ident, |name| TokenKind::Ident(name.to_string()))(input)
}

/// Identifier or whole-word keyword, matched case-insensitively.
fn lex_word_lenient(input: &str) -> IResult<&str, TokenKind> {
    let (rest, word) = lex_ident(input)?;
    let kind = if word.eq_ignore_ascii_case("NOT") {
        TokenKind::Not
    } else if word.eq_ignore_ascii_case("AND") {
        TokenKind::And
    } else if word.eq_ignore_ascii_case("OR") {
        TokenKind::Or
    } else if word.eq_ignore_ascii_case("THEN") {
        TokenKind::Implies
    } else if word.eq_ignore_ascii_case("IFF") {
        TokenKind::Iff
    } else if word.eq_ignore_ascii_case("TRUE") {
        TokenKind::True
    } else if word.eq_ignore_ascii_case("FALSE") {
        TokenKind::False
    } else {
        TokenKind::Ident(word.to_string())
    };
    Ok((rest, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str, mode: ParseMode) -> Vec<TokenKind> {
        tokenize(input, mode)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lenient_synonyms() {
        for src in ["A & B", "A && B", "A AND B", "a ∧ b"] {
            let toks = kinds(src, ParseMode::Lenient);
            assert_eq!(toks.len(), 3, "{}", src);
            assert_eq!(toks[1], TokenKind::And, "{}", src);
        }
        assert_eq!(kinds("A -> B", ParseMode::Lenient)[1], TokenKind::Implies);
        assert_eq!(kinds("A ⇒ B", ParseMode::Lenient)[1], TokenKind::Implies);
        assert_eq!(kinds("A <-> B", ParseMode::Lenient)[1], TokenKind::Iff);
        assert_eq!(kinds("¬A", ParseMode::Lenient)[0], TokenKind::Not);
    }

    #[test]
    fn test_lenient_keywords_case_insensitive() {
        assert_eq!(kinds("x then y", ParseMode::Lenient)[1], TokenKind::Implies);
        assert_eq!(kinds("true", ParseMode::Lenient)[0], TokenKind::True);
        assert_eq!(kinds("False", ParseMode::Lenient)[0], TokenKind::False);
    }

    #[test]
    fn test_strict_keywords_are_identifiers() {
        let toks = kinds("A AND B", ParseMode::Strict);
        assert_eq!(
            toks,
            vec![
                TokenKind::Ident("A".into()),
                TokenKind::Ident("AND".into()),
                TokenKind::Ident("B".into()),
            ]
        );
        assert_eq!(
            kinds("TRUE", ParseMode::Strict),
            vec![TokenKind::Ident("TRUE".into())]
        );
    }

    #[test]
    fn test_strict_rejects_unicode() {
        let err = tokenize("¬A", ParseMode::Strict).unwrap_err();
        assert!(err.to_string().contains("byte 0"), "{}", err);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize("  A  => B", ParseMode::Lenient).unwrap();
        assert_eq!(tokens[0].pos, 2);
        assert_eq!(tokens[1].pos, 5);
        assert_eq!(tokens[2].pos, 8);
    }
}
