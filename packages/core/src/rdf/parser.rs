//! Statement parser: turns the token stream into subject–predicate–object
//! triples with every name expanded to a full IRI.
//!
//! Grammar (a Turtle subset):
//!
//! ```text
//! document    := (directive | triples)*
//! directive   := '@prefix' PNAME_NS IRI '.' | '@base' IRI '.'
//! triples     := subject predicateObjectList '.'
//! predObjList := verb objectList (';' (verb objectList)?)*
//! objectList  := object (',' object)*
//! ```
//!
//! In lenient mode a broken predicate-object pair is skipped up to the next
//! `;` or `.`, and a broken statement up to the next `.`, so a single bad
//! line never takes its neighbours down with it.

use std::collections::HashMap;

use super::lexer::{tokenize, Token, TokenKind};
use super::vocab::{PREFIXES, RDF_TYPE, XSD_BOOLEAN, XSD_DECIMAL, XSD_DOUBLE, XSD_INTEGER};
use super::RdfError;

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub lexical: String,
    /// Full datatype IRI, if tagged.
    pub datatype: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Iri(String),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
    pub line: usize,
}

/// Parse `input` into triples.
///
/// With `strict` set, the first syntax error is returned. Otherwise broken
/// statements are dropped and parsing carries on.
pub fn parse(input: &str, strict: bool) -> Result<Vec<Triple>, RdfError> {
    let tokens = tokenize(input);
    let last_line = tokens.last().map(|t| t.line).unwrap_or(1);
    let mut parser = Parser {
        tokens,
        pos: 0,
        last_line,
        strict,
        prefixes: PREFIXES
            .iter()
            .map(|(label, ns)| (label.to_string(), ns.to_string()))
            .collect(),
        out: Vec::new(),
    };
    parser.document()?;
    Ok(parser.out)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    last_line: usize,
    strict: bool,
    prefixes: HashMap<String, String>,
    out: Vec<Triple>,
}

impl Parser {
    fn document(&mut self) -> Result<(), RdfError> {
        while self.peek().is_some() {
            let result = match self.peek() {
                Some(TokenKind::Directive(_)) => self.directive(),
                _ => self.triples(),
            };
            if let Err(e) = result {
                if self.strict {
                    return Err(e);
                }
                tracing::debug!("rdf: skipping statement: {e}");
                self.skip_past_dot();
            }
        }
        Ok(())
    }

    fn directive(&mut self) -> Result<(), RdfError> {
        let Some(TokenKind::Directive(name)) = self.bump_kind() else {
            return Err(self.error("expected directive"));
        };
        match name.as_str() {
            "prefix" => {
                let label = match self.bump_kind() {
                    Some(TokenKind::Prefixed { prefix, local }) if local.is_empty() => prefix,
                    _ => return Err(self.error_before("expected prefix label such as `wam:`")),
                };
                let iri = match self.bump_kind() {
                    Some(TokenKind::Iri(iri)) => iri,
                    _ => return Err(self.error_before("expected namespace IRI")),
                };
                self.prefixes.insert(label, iri);
            }
            _ => {
                // `@base` is accepted and ignored: every IRI we emit is absolute.
                if !matches!(self.bump_kind(), Some(TokenKind::Iri(_))) {
                    return Err(self.error_before("expected base IRI"));
                }
            }
        }
        self.expect_dot()
    }

    fn triples(&mut self) -> Result<(), RdfError> {
        let subject = self.iri()?;
        loop {
            if let Err(e) = self.predicate_objects(&subject) {
                if self.strict {
                    return Err(e);
                }
                tracing::debug!("rdf: skipping predicate of {subject}: {e}");
                self.skip_to_separator();
            }
            match self.peek() {
                Some(TokenKind::Semicolon) => {
                    while self.peek() == Some(&TokenKind::Semicolon) {
                        self.pos += 1;
                    }
                    if self.peek() == Some(&TokenKind::Dot) {
                        self.pos += 1;
                        return Ok(());
                    }
                    if self.peek().is_none() {
                        return self.unterminated();
                    }
                }
                Some(TokenKind::Dot) => {
                    self.pos += 1;
                    return Ok(());
                }
                None => return self.unterminated(),
                Some(_) => return Err(self.error("expected `;` or `.`")),
            }
        }
    }

    fn predicate_objects(&mut self, subject: &str) -> Result<(), RdfError> {
        let predicate = match self.peek() {
            Some(TokenKind::A) => {
                self.pos += 1;
                RDF_TYPE.to_string()
            }
            _ => self.iri()?,
        };
        loop {
            let line = self.line();
            let object = self.object()?;
            self.out.push(Triple {
                subject: subject.to_string(),
                predicate: predicate.clone(),
                object,
                line,
            });
            if self.peek() == Some(&TokenKind::Comma) {
                self.pos += 1;
            } else {
                return Ok(());
            }
        }
    }

    fn object(&mut self) -> Result<Term, RdfError> {
        match self.peek().cloned() {
            Some(TokenKind::Literal(lexical)) => {
                self.pos += 1;
                let mut literal = Literal {
                    lexical,
                    datatype: None,
                    language: None,
                };
                match self.peek().cloned() {
                    Some(TokenKind::LangTag(tag)) => {
                        self.pos += 1;
                        literal.language = Some(tag);
                    }
                    Some(TokenKind::Datatype) => {
                        self.pos += 1;
                        literal.datatype = Some(self.iri()?);
                    }
                    _ => {}
                }
                Ok(Term::Literal(literal))
            }
            Some(TokenKind::Number(lexical)) => {
                self.pos += 1;
                let datatype = if lexical.contains(['e', 'E']) {
                    XSD_DOUBLE
                } else if lexical.contains('.') {
                    XSD_DECIMAL
                } else {
                    XSD_INTEGER
                };
                Ok(Term::Literal(Literal {
                    lexical,
                    datatype: Some(datatype.to_string()),
                    language: None,
                }))
            }
            Some(TokenKind::Boolean(b)) => {
                self.pos += 1;
                Ok(Term::Literal(Literal {
                    lexical: b.to_string(),
                    datatype: Some(XSD_BOOLEAN.to_string()),
                    language: None,
                }))
            }
            _ => self.iri().map(Term::Iri),
        }
    }

    /// An `<iri>` or a prefixed name, expanded.
    fn iri(&mut self) -> Result<String, RdfError> {
        match self.peek().cloned() {
            Some(TokenKind::Iri(iri)) => {
                self.pos += 1;
                Ok(iri)
            }
            Some(TokenKind::Prefixed { prefix, local }) => {
                let Some(ns) = self.prefixes.get(&prefix) else {
                    return Err(self.error(&format!("undeclared prefix `{prefix}:`")));
                };
                let iri = format!("{ns}{local}");
                self.pos += 1;
                Ok(iri)
            }
            Some(TokenKind::Invalid(msg)) => Err(self.error(&msg)),
            Some(other) => Err(self.error(&format!("expected IRI, found {other:?}"))),
            None => Err(self.error("unexpected end of document")),
        }
    }

    fn expect_dot(&mut self) -> Result<(), RdfError> {
        match self.peek() {
            Some(TokenKind::Dot) => {
                self.pos += 1;
                Ok(())
            }
            None => self.unterminated(),
            Some(_) => Err(self.error("expected `.`")),
        }
    }

    /// A statement cut off by the end of the document. Strict mode rejects
    /// it; lenient mode keeps the triples already read.
    fn unterminated(&self) -> Result<(), RdfError> {
        if self.strict {
            Err(self.error("statement is missing its terminating `.`"))
        } else {
            Ok(())
        }
    }

    fn skip_to_separator(&mut self) {
        while let Some(kind) = self.peek() {
            if matches!(kind, TokenKind::Semicolon | TokenKind::Dot) {
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_past_dot(&mut self) {
        while let Some(kind) = self.bump_kind() {
            if kind == TokenKind::Dot {
                return;
            }
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn bump_kind(&mut self) -> Option<TokenKind> {
        let kind = self.tokens.get(self.pos).map(|t| t.kind.clone());
        if kind.is_some() {
            self.pos += 1;
        }
        kind
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.line)
            .unwrap_or(self.last_line)
    }

    fn error(&self, message: &str) -> RdfError {
        RdfError::Syntax {
            line: self.line(),
            message: message.to_string(),
        }
    }

    /// Error reported at the token just consumed.
    fn error_before(&self, message: &str) -> RdfError {
        let line = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.line)
            .unwrap_or(self.last_line);
        RdfError::Syntax {
            line,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::{NODE_NS, WAM_NS};

    #[test]
    fn expands_prefixed_names() {
        let triples = parse("node:a1 wam:label \"Portal\" .", true).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].subject, format!("{NODE_NS}a1"));
        assert_eq!(triples[0].predicate, format!("{WAM_NS}label"));
        assert_eq!(
            triples[0].object,
            Term::Literal(Literal {
                lexical: "Portal".into(),
                datatype: None,
                language: None
            })
        );
    }

    #[test]
    fn custom_prefix_labels_resolve() {
        let doc = "@prefix w: <http://example.org/wam#> .\n\
                   <http://example.org/wam/node/a1> a w:ApplicationNode ; w:x 10 , 20 .";
        let triples = parse(doc, true).unwrap();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0].predicate, RDF_TYPE);
        assert_eq!(
            triples[0].object,
            Term::Iri("http://example.org/wam#ApplicationNode".into())
        );
        assert!(matches!(
            &triples[2].object,
            Term::Literal(l) if l.lexical == "20" && l.datatype.as_deref() == Some(XSD_INTEGER)
        ));
    }

    #[test]
    fn dot_on_its_own_line_terminates_block() {
        let doc = "node:a1 wam:id \"a1\" ;\n    wam:label \"A\"\n.\nnode:b1 wam:id \"b1\"\n.\n";
        let triples = parse(doc, true).unwrap();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[2].line, 4);
    }

    #[test]
    fn lenient_mode_skips_only_the_broken_pair() {
        let doc = "node:a1 wam:id \"a1\" ;\n    wam:label \"unterminated\n    ; wam:x 5\n.\n";
        let triples = parse(doc, false).unwrap();
        let preds: Vec<&str> = triples.iter().map(|t| t.predicate.as_str()).collect();
        assert_eq!(preds, [format!("{WAM_NS}id"), format!("{WAM_NS}x")]);
    }

    #[test]
    fn strict_mode_reports_line() {
        let doc = "node:a1 wam:id \"a1\" ;\n    bogus:label \"A\"\n.\n";
        assert_eq!(
            parse(doc, true),
            Err(RdfError::Syntax {
                line: 2,
                message: "undeclared prefix `bogus:`".into()
            })
        );
        assert!(parse(doc, false).is_ok());
    }

    #[test]
    fn missing_final_dot() {
        let doc = "node:a1 wam:id \"a1\"";
        assert!(parse(doc, true).is_err());
        assert_eq!(parse(doc, false).unwrap().len(), 1);
    }
}
