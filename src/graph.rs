//! The triple graph exchanged with remote services, plus the node and
//! literal types that appear in it.
//!
//! The graph is append-only: the materializer writes into it, the
//! reflector only reads. Identical triples are kept once, so repeated
//! emission of the same edge is invisible to readers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasherDefault;
use std::ops;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use seahash::SeaHasher;

use crate::vocabulary::xsd;

pub type GraphHasher = BuildHasherDefault<SeaHasher>;

// ------------- Iri -------------
lazy_static! {
    // an absolute locator: scheme followed by a non-empty remainder
    static ref SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S+$").unwrap();
}

/// An absolute resource locator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Iri(String);

impl Iri {
    /// Validating constructor for locators coming from the outside
    /// (wire text, literals, configuration).
    pub fn parse(s: &str) -> Option<Iri> {
        if SCHEME.is_match(s) {
            Some(Iri(s.to_owned()))
        } else {
            None
        }
    }

    /// Unchecked constructor for the vocabulary constants and other
    /// URIs the crate itself assembled. The caller vouches for
    /// well-formedness.
    pub fn known(s: &str) -> Iri {
        Iri(s.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a path segment, inserting a separating slash if needed.
    pub fn join(&self, segment: &str) -> Iri {
        let base = self.0.trim_end_matches('/');
        let segment = segment.trim_start_matches('/');
        Iri(format!("{}/{}", base, segment))
    }

    /// Everything up to and including the last `#` or `/`.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(['#', '/']) {
            Some(pos) => &self.0[..=pos],
            None => &self.0,
        }
    }

    /// The local name after the last `#` or `/`.
    pub fn local_name(&self) -> &str {
        match self.0.rfind(['#', '/']) {
            Some(pos) => &self.0[pos + 1..],
            None => "",
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ops::Deref for Iri {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

// ------------- Primitive -------------
/// The primitive datatypes a literal can carry on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    String,
    Integer,
    Double,
    Float,
    Boolean,
    Date,
    DateTime,
    AnyUri,
}

impl Primitive {
    pub fn uri(&self) -> &'static str {
        match self {
            Primitive::String => xsd::STRING,
            Primitive::Integer => xsd::INTEGER,
            Primitive::Double => xsd::DOUBLE,
            Primitive::Float => xsd::FLOAT,
            Primitive::Boolean => xsd::BOOLEAN,
            Primitive::Date => xsd::DATE,
            Primitive::DateTime => xsd::DATE_TIME,
            Primitive::AnyUri => xsd::ANY_URI,
        }
    }

    pub fn from_uri(uri: &str) -> Option<Primitive> {
        match uri {
            xsd::STRING => Some(Primitive::String),
            xsd::INTEGER => Some(Primitive::Integer),
            xsd::DOUBLE => Some(Primitive::Double),
            xsd::FLOAT => Some(Primitive::Float),
            xsd::BOOLEAN => Some(Primitive::Boolean),
            xsd::DATE => Some(Primitive::Date),
            xsd::DATE_TIME => Some(Primitive::DateTime),
            xsd::ANY_URI => Some(Primitive::AnyUri),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", Iri::known(self.uri()).local_name())
    }
}

// ------------- Literal -------------
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A typed literal value. The lexical form is kept verbatim so that
/// equality and hashing stay exact even for floating point datatypes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Literal {
    lexical: String,
    primitive: Primitive,
}

impl Literal {
    pub fn typed(lexical: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            lexical: lexical.into(),
            primitive,
        }
    }
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(value, Primitive::String)
    }
    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), Primitive::Integer)
    }
    pub fn double(value: f64) -> Self {
        Self::typed(value.to_string(), Primitive::Double)
    }
    pub fn float(value: f32) -> Self {
        Self::typed(value.to_string(), Primitive::Float)
    }
    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), Primitive::Boolean)
    }
    pub fn date(value: NaiveDate) -> Self {
        Self::typed(value.format(DATE_FORMAT).to_string(), Primitive::Date)
    }
    pub fn date_time(value: NaiveDateTime) -> Self {
        Self::typed(
            value.format(DATE_TIME_FORMAT).to_string(),
            Primitive::DateTime,
        )
    }
    pub fn any_uri(value: &Iri) -> Self {
        Self::typed(value.as_str(), Primitive::AnyUri)
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    // lexical accessors; None when the text does not match the datatype
    pub fn as_i64(&self) -> Option<i64> {
        self.lexical.parse().ok()
    }
    pub fn as_f64(&self) -> Option<f64> {
        self.lexical.parse().ok()
    }
    pub fn as_f32(&self) -> Option<f32> {
        self.lexical.parse().ok()
    }
    pub fn as_bool(&self) -> Option<bool> {
        self.lexical.parse().ok()
    }
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.lexical, DATE_TIME_FORMAT)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&self.lexical, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
    pub fn as_iri(&self) -> Option<Iri> {
        Iri::parse(&self.lexical)
    }
}

pub(crate) fn escape_lexical(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", escape_lexical(&self.lexical))?;
        if self.primitive != Primitive::String {
            write!(f, "^^<{}>", self.primitive.uri())?;
        }
        Ok(())
    }
}

// ------------- Nodes and triples -------------
/// A node that can stand as a subject: a named resource or an anonymous
/// blank identifier.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum NodeId {
    Named(Iri),
    Blank(String),
}

impl NodeId {
    pub fn iri(&self) -> Option<&Iri> {
        match self {
            NodeId::Named(iri) => Some(iri),
            NodeId::Blank(_) => None,
        }
    }
    pub fn is_blank(&self) -> bool {
        matches!(self, NodeId::Blank(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeId::Named(iri) => write!(f, "<{}>", iri),
            NodeId::Blank(label) => write!(f, "_:{}", label),
        }
    }
}

/// An object position: another node or a literal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Node(NodeId),
    Literal(Literal),
}

impl Term {
    pub fn named(iri: Iri) -> Term {
        Term::Node(NodeId::Named(iri))
    }
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Term::Node(n) => Some(n),
            Term::Literal(_) => None,
        }
    }
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            Term::Node(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Node(n) => write!(f, "{}", n),
            Term::Literal(l) => write!(f, "{}", l),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Triple {
    pub subject: NodeId,
    pub predicate: Iri,
    pub object: Term,
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} .",
            self.subject, self.predicate, self.object
        )
    }
}

// ------------- BlankGenerator -------------
/// Hands out anonymous node labels. Labels read back from the wire are
/// retained so freshly generated ones cannot collide with them.
#[derive(Debug, Default, Clone)]
pub struct BlankGenerator {
    lower_bound: u64,
}

impl BlankGenerator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn generate(&mut self) -> String {
        self.lower_bound += 1;
        format!("b{}", self.lower_bound)
    }
    pub fn retain(&mut self, label: &str) {
        if let Some(digits) = label.strip_prefix('b') {
            if let Ok(n) = digits.parse::<u64>() {
                if n > self.lower_bound {
                    self.lower_bound = n;
                }
            }
        }
    }
}

// ------------- Graph -------------
#[derive(Debug, Default, Clone)]
pub struct Graph {
    triples: Vec<Arc<Triple>>,
    kept: HashSet<Arc<Triple>, GraphHasher>,
    by_subject_predicate: HashMap<(NodeId, Iri), Vec<Arc<Triple>>, GraphHasher>,
    subjects: HashSet<NodeId, GraphHasher>,
    blanks: BlankGenerator,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a triple. Returns false if an identical triple was
    /// already present; the graph is left unchanged in that case.
    pub fn insert(&mut self, subject: NodeId, predicate: Iri, object: Term) -> bool {
        if let NodeId::Blank(label) = &subject {
            self.blanks.retain(label);
        }
        if let Term::Node(NodeId::Blank(label)) = &object {
            self.blanks.retain(label);
        }
        let triple = Arc::new(Triple {
            subject,
            predicate,
            object,
        });
        if !self.kept.insert(Arc::clone(&triple)) {
            return false;
        }
        self.subjects.insert(triple.subject.clone());
        self.by_subject_predicate
            .entry((triple.subject.clone(), triple.predicate.clone()))
            .or_default()
            .push(Arc::clone(&triple));
        self.triples.push(triple);
        true
    }

    pub fn fresh_blank(&mut self) -> NodeId {
        NodeId::Blank(self.blanks.generate())
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter().map(|t| t.as_ref())
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.kept.contains(triple)
    }

    /// True when at least one triple has this node as its subject.
    pub fn has_subject(&self, node: &NodeId) -> bool {
        self.subjects.contains(node)
    }

    /// All objects of edges labeled `predicate` leaving `subject`, in
    /// insertion order.
    pub fn objects<'g>(
        &'g self,
        subject: &NodeId,
        predicate: &str,
    ) -> impl Iterator<Item = &'g Term> + 'g {
        let key = (subject.clone(), Iri::known(predicate));
        self.by_subject_predicate
            .get(&key)
            .into_iter()
            .flat_map(|v| v.iter())
            .map(|t| &t.object)
    }

    /// The first object of such an edge, if any.
    pub fn object(&self, subject: &NodeId, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    pub fn literal_object(&self, subject: &NodeId, predicate: &str) -> Option<&Literal> {
        self.objects(subject, predicate).find_map(|t| t.literal())
    }

    pub fn literal_objects<'g>(
        &'g self,
        subject: &NodeId,
        predicate: &str,
    ) -> impl Iterator<Item = &'g Literal> + 'g {
        self.objects(subject, predicate).filter_map(|t| t.literal())
    }

    pub fn node_objects(&self, subject: &NodeId, predicate: &str) -> Vec<NodeId> {
        self.objects(subject, predicate)
            .filter_map(|t| t.node())
            .cloned()
            .collect()
    }

    /// The directly asserted types of a node.
    pub fn types_of(&self, subject: &NodeId) -> HashSet<Iri, GraphHasher> {
        self.objects(subject, crate::vocabulary::rdf::TYPE)
            .filter_map(|t| t.node())
            .filter_map(|n| n.iri())
            .cloned()
            .collect()
    }

    /// Subjects carrying a direct type edge to the given class, in
    /// first-appearance order.
    pub fn subjects_typed(&self, class: &str) -> Vec<NodeId> {
        let mut seen: HashSet<&NodeId, GraphHasher> = HashSet::default();
        let mut found = Vec::new();
        for triple in &self.triples {
            if triple.predicate.as_str() != crate::vocabulary::rdf::TYPE {
                continue;
            }
            let typed = matches!(
                &triple.object,
                Term::Node(NodeId::Named(iri)) if iri.as_str() == class
            );
            if typed && seen.insert(&triple.subject) {
                found.push(triple.subject.clone());
            }
        }
        found
    }
}
