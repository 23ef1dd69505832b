//! Lexer for template hole expressions.

use super::ExprError;
use super::token::{Token, TokenKind};

/// A cursor over expression text with peek/advance semantics.
///
/// Expressions are single-line, so only the byte offset is tracked.
struct Cursor<'src> {
    rest: &'src str,
    offset: u32,
}

impl<'src> Cursor<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            rest: src,
            offset: 0,
        }
    }

    #[inline]
    fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        let len = ch.len_utf8();
        self.rest = &self.rest[len..];
        self.offset += len as u32;
        Some(ch)
    }

    #[inline]
    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches, returning the slice.
    fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.rest;
        let mut len = 0;
        while self.peek().is_some_and(&f) {
            len += self.advance().map_or(0, char::len_utf8);
        }
        &start[..len]
    }
}

/// Lex an expression into tokens.
pub(crate) fn lex(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut cursor = Cursor::new(src);
    let mut tokens = Vec::new();

    while let Some(ch) = cursor.peek() {
        let offset = cursor.offset();

        if ch.is_ascii_whitespace() {
            cursor.advance();
            continue;
        }

        let kind = match ch {
            '0'..='9' => number(&mut cursor, offset)?,
            '\'' | '"' => string(&mut cursor, offset)?,
            _ if is_ident_start(ch) => ident(&mut cursor),
            '+' => op(&mut cursor, TokenKind::Plus),
            '-' => op(&mut cursor, TokenKind::Minus),
            '*' => op(&mut cursor, TokenKind::Star),
            '/' => op(&mut cursor, TokenKind::Slash),
            '%' => op(&mut cursor, TokenKind::Percent),
            '(' => op(&mut cursor, TokenKind::LParen),
            ')' => op(&mut cursor, TokenKind::RParen),
            '!' => {
                cursor.advance();
                if cursor.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                cursor.advance();
                if cursor.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                cursor.advance();
                if cursor.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '=' if cursor.peek_nth(1) == Some('=') => {
                cursor.advance();
                cursor.advance();
                TokenKind::EqEq
            }
            '&' if cursor.peek_nth(1) == Some('&') => {
                cursor.advance();
                cursor.advance();
                TokenKind::AndAnd
            }
            '|' if cursor.peek_nth(1) == Some('|') => {
                cursor.advance();
                cursor.advance();
                TokenKind::OrOr
            }
            _ => return Err(ExprError::UnexpectedChar { ch, offset }),
        };

        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn op(cursor: &mut Cursor, kind: TokenKind) -> TokenKind {
    cursor.advance();
    kind
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ident(cursor: &mut Cursor) -> TokenKind {
    let text = cursor.eat_while(is_ident_continue);
    match text {
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => TokenKind::Ident(text.to_string()),
    }
}

fn number(cursor: &mut Cursor, offset: u32) -> Result<TokenKind, ExprError> {
    let integral = cursor.eat_while(|c| c.is_ascii_digit());

    // A '.' only extends the number when digits follow it.
    let fractional = if cursor.peek() == Some('.') && cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.advance();
        Some(cursor.eat_while(|c| c.is_ascii_digit()))
    } else {
        None
    };

    match fractional {
        Some(frac) => {
            let text = format!("{integral}.{frac}");
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| ExprError::InvalidNumber { text, offset })
        }
        None => integral
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| ExprError::InvalidNumber {
                text: integral.to_string(),
                offset,
            }),
    }
}

fn string(cursor: &mut Cursor, offset: u32) -> Result<TokenKind, ExprError> {
    let quote = match cursor.advance() {
        Some(q) => q,
        None => return Err(ExprError::UnterminatedString { offset }),
    };
    let mut text = String::new();

    loop {
        match cursor.advance() {
            None => return Err(ExprError::UnterminatedString { offset }),
            Some(c) if c == quote => break,
            Some('\\') => match cursor.advance() {
                None => return Err(ExprError::UnterminatedString { offset }),
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                // \\, \', \", \` and any other escaped char decode to the
                // char itself.
                Some(escaped) => text.push(escaped),
            },
            Some(c) => text.push(c),
        }
    }

    Ok(TokenKind::Str(text))
}
