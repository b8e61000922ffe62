// src/parse/parser.rs

//! Recursive-descent parser for the graph-description language.
//!
//! Parsing runs in two phases. The statement pass walks the token stream
//! with one token of lookahead and collects pending node and edge
//! declarations without resolving anything, so edges may freely name
//! tasks declared further down the file. The resolution pass then
//! materializes tasks in declaration order and wires edges up, at which
//! point an endpoint that was never declared anywhere is an error.
//!
//! Parsing does not recover: the first error aborts the whole parse.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{Result, SchedagError};
use crate::graph::{AttrMap, TaskGraph};
use crate::parse::lexer::Lexer;
use crate::parse::token::{Span, Token, TokenKind};

/// Parse a complete graph description into a resolved [`TaskGraph`].
pub fn parse(input: &str) -> Result<TaskGraph> {
    Parser::new(input)?.parse_graph()
}

/// Node declaration awaiting resolution. Repeated declarations of the
/// same id merge into one entry, later attribute values winning per key.
struct PendingNode {
    name: String,
    attrs: AttrMap,
}

/// Edge declaration awaiting resolution. The span of the source id is
/// kept so resolution errors can point back at the statement.
struct PendingEdge {
    from: String,
    to: String,
    attrs: AttrMap,
    span: Span,
}

/// Everything gathered by the statement pass.
#[derive(Default)]
struct PendingGraph {
    /// Node declarations in first-declaration order.
    nodes: Vec<PendingNode>,
    /// Name to slot in `nodes`.
    node_slots: HashMap<String, usize>,
    /// Edge declarations in declaration order.
    edges: Vec<PendingEdge>,
    /// Accumulated `graph [...]` attributes.
    attrs: AttrMap,
}

impl PendingGraph {
    fn declare_node(&mut self, name: String, attrs: AttrMap) {
        match self.node_slots.get(&name) {
            Some(&slot) => self.nodes[slot].attrs.merge(attrs),
            None => {
                self.node_slots.insert(name.clone(), self.nodes.len());
                self.nodes.push(PendingNode { name, attrs });
            }
        }
    }
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
}

impl<'src> Parser<'src> {
    pub fn new(input: &'src str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// `["strict"] "digraph" [ID] "{" statement* "}"`
    pub fn parse_graph(mut self) -> Result<TaskGraph> {
        let strict = if self.current.kind.is_keyword("strict") {
            self.bump()?;
            true
        } else {
            false
        };

        if !self.current.kind.is_keyword("digraph") {
            return Err(self.error_unexpected("keyword 'digraph'"));
        }
        self.bump()?;

        let name = match self.current.kind.id_text() {
            Some(text) => {
                let name = text.to_string();
                self.bump()?;
                name
            }
            None => String::new(),
        };

        self.expect(TokenKind::LBrace)?;

        let mut pending = PendingGraph::default();
        while self.current.kind != TokenKind::RBrace {
            self.parse_statement(&mut pending)?;
        }
        self.expect(TokenKind::RBrace)?;

        resolve(name, strict, pending)
    }

    /// One statement: a node or edge declaration, a `graph [...]`
    /// attribute statement, or a bare `;`.
    fn parse_statement(&mut self, pending: &mut PendingGraph) -> Result<()> {
        if let Some(text) = self.current.kind.id_text() {
            let id = text.to_string();
            let span = self.current.span;
            self.bump()?;

            if self.current.kind == TokenKind::Arrow {
                self.bump()?;
                let Some(text) = self.current.kind.id_text() else {
                    return Err(self.error_unexpected("node id after '->'"));
                };
                let to = text.to_string();
                self.bump()?;

                let attrs = self.parse_optional_attrs()?;
                self.eat_semi()?;
                pending.edges.push(PendingEdge {
                    from: id,
                    to,
                    attrs,
                    span,
                });
            } else {
                let attrs = self.parse_optional_attrs()?;
                self.eat_semi()?;
                pending.declare_node(id, attrs);
            }
            Ok(())
        } else if self.current.kind == TokenKind::Semi {
            self.bump()
        } else if self.current.kind.is_keyword("graph") {
            self.bump()?;
            let attrs = self.parse_attr_list()?;
            pending.attrs.merge(attrs);
            self.eat_semi()
        } else {
            Err(self.error_unexpected("statement"))
        }
    }

    /// `"[" ( ID "=" ID ("," | ";")? )* "]"`
    fn parse_attr_list(&mut self) -> Result<AttrMap> {
        self.expect(TokenKind::LBracket)?;

        let mut attrs = AttrMap::new();
        while self.current.kind != TokenKind::RBracket {
            let Some(text) = self.current.kind.id_text() else {
                return Err(self.error_unexpected("attribute key"));
            };
            let key = text.to_string();
            self.bump()?;

            self.expect(TokenKind::Eq)?;

            let Some(text) = self.current.kind.id_text() else {
                return Err(self.error_unexpected("attribute value"));
            };
            let value = text.to_string();
            self.bump()?;

            attrs.set(key, value);

            if matches!(self.current.kind, TokenKind::Comma | TokenKind::Semi) {
                self.bump()?;
            }
        }

        self.expect(TokenKind::RBracket)?;
        Ok(attrs)
    }

    fn parse_optional_attrs(&mut self) -> Result<AttrMap> {
        if self.current.kind == TokenKind::LBracket {
            self.parse_attr_list()
        } else {
            Ok(AttrMap::new())
        }
    }

    fn bump(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.current.kind != kind {
            return Err(self.error_unexpected(&kind.to_string()));
        }
        self.bump()
    }

    /// Consume one trailing `;` if present.
    fn eat_semi(&mut self) -> Result<()> {
        if self.current.kind == TokenKind::Semi {
            self.bump()?;
        }
        Ok(())
    }

    fn error_unexpected(&self, expected: &str) -> SchedagError {
        SchedagError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current.kind.to_string(),
            line: self.current.span.line,
            col: self.current.span.col,
        }
    }
}

/// Materialize pending declarations into a resolved graph.
fn resolve(name: String, strict: bool, pending: PendingGraph) -> Result<TaskGraph> {
    let mut graph = TaskGraph::new(name, strict);
    graph.merge_attrs(pending.attrs);

    for node in pending.nodes {
        graph.add_task(node.name, node.attrs);
    }

    for edge in pending.edges {
        let from = graph.task_id(&edge.from);
        let to = graph.task_id(&edge.to);
        let (Some(from), Some(to)) = (from, to) else {
            let missing = if from.is_none() { &edge.from } else { &edge.to };
            return Err(SchedagError::UndeclaredNode {
                missing: missing.clone(),
                from: edge.from,
                to: edge.to,
                line: edge.span.line,
                col: edge.span.col,
            });
        };
        graph.add_dep(from, to, edge.attrs);
    }

    debug!(
        name = %graph.name(),
        strict = graph.is_strict(),
        tasks = graph.task_count(),
        deps = graph.dep_count(),
        "resolved task graph"
    );

    Ok(graph)
}
