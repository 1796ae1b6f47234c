//! The narrow transport contract and the in-memory collaborator.
//!
//! The core never talks HTTP itself: it hands a locator and an optional
//! credential to a [`Fetch`] or [`Post`] implementation and gets back a
//! graph, a result locator, or a transport error — forwarded as-is,
//! never wrapped. Retries, redirects and TLS are the collaborator's
//! business.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::error::{Result, ToxigraphError};
use crate::graph::{Graph, Iri, NodeId};
use crate::materialize::Materializer;
use crate::ontology::{ClassKeeper, PropertyKeeper};
use crate::resource::{BibEntry, Dataset, Feature};

/// A bearer token for the remote service.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
    pub fn token(&self) -> &str {
        &self.0
    }
}

// tokens stay out of logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// What a post yields: the locator of the created resource, or a bare
/// status code when the service created nothing addressable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostOutcome {
    Created(Iri),
    Accepted(u16),
}

pub trait Fetch {
    fn fetch(&self, locator: &Iri, credential: Option<&Credential>) -> Result<Graph>;
}

pub trait Post {
    fn post(
        &self,
        locator: &Iri,
        credential: Option<&Credential>,
        graph: &Graph,
    ) -> Result<PostOutcome>;
}

// ------------- InMemoryService -------------
/// A complete service double: graphs keyed by locator, optional bearer
/// token, fresh child locators minted on post. Used by the test suites
/// and served over HTTP by the loopback binary.
pub struct InMemoryService {
    base: Iri,
    graphs: Mutex<HashMap<Iri, Graph>>,
    token: Option<String>,
    minted: Mutex<u64>,
}

impl InMemoryService {
    pub fn new(base: Iri) -> Self {
        Self {
            base,
            graphs: Mutex::new(HashMap::new()),
            token: None,
            minted: Mutex::new(0),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base(&self) -> &Iri {
        &self.base
    }

    /// Seeds or replaces the graph stored at a locator.
    pub fn put_graph(&self, locator: Iri, graph: Graph) {
        self.graphs.lock().unwrap().insert(locator, graph);
    }

    pub fn len(&self) -> usize {
        self.graphs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.lock().unwrap().is_empty()
    }

    fn authorize(&self, credential: Option<&Credential>) -> Result<()> {
        match &self.token {
            None => Ok(()),
            Some(expected) => match credential {
                Some(c) if c.token() == expected => Ok(()),
                Some(_) => Err(ToxigraphError::Unauthorized("credential rejected".into())),
                None => Err(ToxigraphError::Unauthorized("credential required".into())),
            },
        }
    }
}

impl Fetch for InMemoryService {
    fn fetch(&self, locator: &Iri, credential: Option<&Credential>) -> Result<Graph> {
        self.authorize(credential)?;
        self.graphs
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .ok_or_else(|| ToxigraphError::Transport {
                status: Some(404),
                message: format!("nothing at <{}>", locator),
            })
    }
}

impl Post for InMemoryService {
    fn post(
        &self,
        locator: &Iri,
        credential: Option<&Credential>,
        graph: &Graph,
    ) -> Result<PostOutcome> {
        self.authorize(credential)?;
        let mut minted = self.minted.lock().unwrap();
        *minted += 1;
        let created = locator.join(&minted.to_string());
        self.graphs
            .lock()
            .unwrap()
            .insert(created.clone(), graph.clone());
        Ok(PostOutcome::Created(created))
    }
}

// ------------- Publishable -------------
/// Capability for resources that can be deposited on a remote service:
/// materialize into a fresh graph, post the graph, report the outcome.
pub trait Publishable {
    fn write_into(&self, materializer: &mut Materializer) -> NodeId;

    fn publish(
        &self,
        service: &dyn Post,
        collection: &Iri,
        credential: Option<&Credential>,
        classes: &ClassKeeper,
        properties: &PropertyKeeper,
    ) -> Result<PostOutcome> {
        let mut graph = Graph::new();
        let mut materializer = Materializer::new(&mut graph, classes, properties);
        self.write_into(&mut materializer);
        service.post(collection, credential, &graph)
    }
}

impl Publishable for Dataset {
    fn write_into(&self, materializer: &mut Materializer) -> NodeId {
        materializer.attach_dataset(self)
    }
}

impl Publishable for Feature {
    fn write_into(&self, materializer: &mut Materializer) -> NodeId {
        materializer.attach_feature(self)
    }
}

impl Publishable for BibEntry {
    fn write_into(&self, materializer: &mut Materializer) -> NodeId {
        materializer.attach_bibliography(self)
    }
}
