// src/parse/token.rs

//! Lexical tokens of the graph-description language.
//!
//! The language is deliberately small: four reserved words, a handful of
//! punctuation marks, bare identifiers and quoted strings. Each token
//! remembers where it started so diagnostics can point at the source.

use std::fmt;

/// 1-based source position of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

impl Span {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind the lexer can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// One of the reserved words (`digraph`, `graph`, `subgraph`,
    /// `strict`), in whatever casing the source used.
    Keyword(String),
    /// Maximal run of alphanumerics and underscores.
    Ident(String),
    /// `"`-delimited literal, quotes stripped and `\"` unescaped.
    Str(String),
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Semi,     // ;
    Comma,    // ,
    Eq,       // =
    Arrow,    // ->
    Eof,
}

impl TokenKind {
    /// Text of a token usable in `ID` position (bare identifier or quoted
    /// string). Reserved words are not `ID`s.
    pub fn id_text(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) | TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this token is the given reserved word. Keywords compare
    /// case-insensitively; the stored text keeps the source casing.
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(self, TokenKind::Keyword(s) if s.eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(s) => write!(f, "keyword '{s}'"),
            TokenKind::Ident(s) => write!(f, "identifier '{s}'"),
            TokenKind::Str(s) => write!(f, "string \"{s}\""),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Reserved words of the language. Recognition is case-insensitive.
pub fn is_reserved_word(s: &str) -> bool {
    s.eq_ignore_ascii_case("digraph")
        || s.eq_ignore_ascii_case("graph")
        || s.eq_ignore_ascii_case("subgraph")
        || s.eq_ignore_ascii_case("strict")
}
