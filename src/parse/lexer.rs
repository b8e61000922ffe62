// src/parse/lexer.rs

//! Hand-written scanner for the graph-description language.
//!
//! Tokens are produced lazily: the parser pulls one token at a time via
//! [`Lexer::next_token`]. Once the end of input is reached, every further
//! call keeps returning an `Eof` token, so the lexer never runs dry
//! mid-parse. There is no rewinding; a fresh pass needs a fresh lexer.

use crate::errors::{Result, SchedagError};
use crate::parse::token::{Span, Token, TokenKind, is_reserved_word};

/// Scanner state over a source string.
pub struct Lexer<'src> {
    src: &'src str,
    /// Byte offset of the next unread character.
    pos: usize,
    line: u32,
    col: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Scan and return the next token, advancing past it.
    ///
    /// Whitespace and comments (`//`, `#`, `/* ... */`) are skipped first.
    /// The returned span points at the token's first character.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let span = Span::new(self.line, self.col);
        let Some(ch) = self.current() else {
            return Ok(Token::new(TokenKind::Eof, span));
        };

        let kind = match ch {
            '{' => {
                self.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.advance();
                TokenKind::RBrace
            }
            '[' => {
                self.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.advance();
                TokenKind::RBracket
            }
            ';' => {
                self.advance();
                TokenKind::Semi
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            '=' => {
                self.advance();
                TokenKind::Eq
            }
            '-' if self.peek_next() == Some('>') => {
                self.advance();
                self.advance();
                TokenKind::Arrow
            }
            '"' => {
                self.advance();
                TokenKind::Str(self.lex_string_body())
            }
            c if c.is_alphanumeric() || c == '_' => self.lex_word(),
            other => {
                return Err(SchedagError::UnexpectedChar {
                    ch: other,
                    line: span.line,
                    col: span.col,
                });
            }
        };

        Ok(Token::new(kind, span))
    }

    // Cursor helpers

    fn current(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Skip whitespace plus `//`, `#` and `/* ... */` comments. A block
    /// comment left open at end of input simply runs to the end.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.current().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.current(), self.peek_next()) {
                (Some('/'), Some('/')) | (Some('#'), _) => {
                    while self.current().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    while !(self.current() == Some('*') && self.peek_next() == Some('/')) {
                        if self.current().is_none() {
                            return;
                        }
                        self.advance();
                    }
                    self.advance();
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Body of a string literal, opening quote already consumed.
    ///
    /// Only `\"` is an escape; any other backslash is kept verbatim. A
    /// string left open at end of input yields whatever was accumulated.
    fn lex_string_body(&mut self) -> String {
        let mut value = String::new();
        loop {
            match self.current() {
                None => break,
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') if self.peek_next() == Some('"') => {
                    value.push('"');
                    self.advance();
                    self.advance();
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        value
    }

    /// Bare identifier or reserved word. Identifiers are maximal runs of
    /// alphanumerics and underscores; a leading digit is allowed, the
    /// language has no separate number tokens.
    fn lex_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .current()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let word = &self.src[start..self.pos];
        if is_reserved_word(word) {
            TokenKind::Keyword(word.to_string())
        } else {
            TokenKind::Ident(word.to_string())
        }
    }
}
