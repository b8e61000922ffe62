// src/parse/mod.rs

//! Parsing pipeline for the graph-description language.
//!
//! - [`token`] defines spans and token kinds.
//! - [`lexer`] turns source text into tokens on demand.
//! - [`parser`] runs recursive descent over the tokens and resolves the
//!   result into a [`crate::graph::TaskGraph`].

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use token::{Span, Token, TokenKind};
