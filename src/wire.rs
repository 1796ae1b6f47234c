//! Text codec for the wire format.
//!
//! Reads and writes graphs as line-oriented triple statements (the
//! N-Triples subset the remote services speak). Serialization is
//! deterministic in insertion order; parsing reports the offending line
//! on malformed input. Grammar details live in `wire.pest`.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

use crate::error::{Result, ToxigraphError};
use crate::graph::{Graph, Iri, Literal, NodeId, Primitive, Term};

#[derive(Parser)]
#[grammar = "wire.pest"]
struct WireParser;

/// Serializes every triple, one statement per line.
pub fn write_graph(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph.iter() {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}

/// Parses wire text into a graph. Blank labels present in the text are
/// retained so that fresh blanks generated later cannot collide.
pub fn read_graph(text: &str) -> Result<Graph> {
    let mut parsed = WireParser::parse(Rule::document, text).map_err(syntax)?;
    let document = parsed.next().expect("grammar yields one document");
    let mut graph = Graph::new();
    for statement in document.into_inner() {
        if statement.as_rule() != Rule::statement {
            continue; // EOI
        }
        let line = statement.as_span().start_pos().line_col().0;
        let mut parts = statement.into_inner();
        let subject = node_from(parts.next().expect("subject"), line)?;
        let predicate = iri_from(
            parts
                .next()
                .expect("predicate")
                .into_inner()
                .next()
                .expect("iriref"),
            line,
        )?;
        let object = term_from(parts.next().expect("object"), line)?;
        graph.insert(subject, predicate, object);
    }
    Ok(graph)
}

fn syntax(e: pest::error::Error<Rule>) -> ToxigraphError {
    use pest::error::LineColLocation;
    let line = match e.line_col {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((line, _), _) => line,
    };
    ToxigraphError::Syntax {
        line,
        message: e.variant.message().into_owned(),
    }
}

// subject and object wrappers carry exactly one inner node
fn node_from(pair: Pair<Rule>, line: usize) -> Result<NodeId> {
    let inner = pair.into_inner().next().expect("node");
    match inner.as_rule() {
        Rule::iriref => Ok(NodeId::Named(iri_from(inner, line)?)),
        Rule::blank => Ok(NodeId::Blank(
            inner.as_str().trim_start_matches("_:").to_owned(),
        )),
        other => Err(ToxigraphError::Syntax {
            line,
            message: format!("unexpected {:?} in node position", other),
        }),
    }
}

fn term_from(pair: Pair<Rule>, line: usize) -> Result<Term> {
    let inner = pair.into_inner().next().expect("term");
    match inner.as_rule() {
        Rule::iriref => Ok(Term::Node(NodeId::Named(iri_from(inner, line)?))),
        Rule::blank => Ok(Term::Node(NodeId::Blank(
            inner.as_str().trim_start_matches("_:").to_owned(),
        ))),
        Rule::literal => Ok(Term::Literal(literal_from(inner, line)?)),
        other => Err(ToxigraphError::Syntax {
            line,
            message: format!("unexpected {:?} in object position", other),
        }),
    }
}

fn iri_from(pair: Pair<Rule>, line: usize) -> Result<Iri> {
    let raw = pair.into_inner().next().expect("iri").as_str();
    Iri::parse(raw).ok_or_else(|| ToxigraphError::Syntax {
        line,
        message: format!("'{}' is not an absolute locator", raw),
    })
}

fn literal_from(pair: Pair<Rule>, line: usize) -> Result<Literal> {
    let mut parts = pair.into_inner();
    let quoted = parts.next().expect("string").as_str();
    let lexical = unescape(&quoted[1..quoted.len() - 1], line)?;
    let primitive = match parts.next() {
        Some(datatype) => {
            let uri = iri_from(datatype, line)?;
            match Primitive::from_uri(uri.as_str()) {
                Some(primitive) => primitive,
                None => {
                    // foreign datatypes degrade to plain strings
                    debug!(datatype = %uri, "unknown literal datatype, kept as string");
                    Primitive::String
                }
            }
        }
        None => Primitive::String,
    };
    Ok(Literal::typed(lexical, primitive))
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            other => {
                return Err(ToxigraphError::Syntax {
                    line,
                    message: format!(
                        "unsupported escape \\{}",
                        other.map(|c| c.to_string()).unwrap_or_default()
                    ),
                });
            }
        }
    }
    Ok(out)
}
