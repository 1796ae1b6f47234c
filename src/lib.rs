//! Toxigraph – exchanges toxicology-service resources with remote
//! services as a generic triple graph.
//!
//! Typed records (algorithms, datasets, tasks, bibliographic entries,
//! features) travel as subject–predicate–object triples. The crate does
//! the bidirectional mapping:
//! * **Materialization** turns a typed resource plus its ontological
//!   annotations into graph nodes and edges, deduplicating shared class
//!   definitions per call and surviving cyclic class hierarchies.
//! * **Reflection** walks a remote graph from a target node: resolve
//!   the full type through a closure over the super-class relation,
//!   read the metadata, follow reference edges, recurse into nested
//!   resources, assemble the typed object.
//!
//! ## Modules
//! * [`vocabulary`] – the well-known predicate and class URIs, byte for byte.
//! * [`graph`] – locators, typed literals, triples and the indexed graph.
//! * [`meta`] – the metadata bag with order-independent equality.
//! * [`ontology`] – ontological classes/properties and their keepers.
//! * [`closure`] – the type-closure resolver.
//! * [`materialize`] – resources into graphs.
//! * [`resource`] – the generic resource and the typed kinds.
//! * [`spider`] – graphs back into resources, one extractor per kind.
//! * [`wire`] – the line-oriented text codec for graphs.
//! * [`transport`] – the fetch/post collaborator contract plus an
//!   in-memory service double.
//! * [`watch`] – a thread-per-watch poller for remote tasks.
//! * [`server`] – the in-memory service exposed over HTTP.
//!
//! ## Quick start
//! ```
//! use toxigraph::graph::Graph;
//! use toxigraph::materialize::Materializer;
//! use toxigraph::ontology::{ClassKeeper, PropertyKeeper};
//! use toxigraph::resource::{Task, TaskStatus};
//! use toxigraph::spider::{Spider, Target, TaskExtractor};
//!
//! let classes = ClassKeeper::standard();
//! let properties = PropertyKeeper::standard();
//! let mut task = Task::new(None, &classes);
//! task.set_status(Some(TaskStatus::Running));
//! task.set_percentage_completed(Some(42.5));
//!
//! let mut graph = Graph::new();
//! let mut materializer = Materializer::new(&mut graph, &classes, &properties);
//! materializer.attach_task(&task);
//!
//! let spider = Spider::new(&graph, &classes);
//! let back = spider.reflect(&Target::Unique, &TaskExtractor).unwrap();
//! assert_eq!(back.status(), Some(TaskStatus::Running));
//! assert_eq!(back.percentage_completed(), Some(42.5));
//! ```
//!
//! ## Errors
//! Reflection and materialization fail with exactly one of: a transport
//! error forwarded from the collaborator, a rejected credential, a
//! structural error (the triples needed to classify or assemble a
//! resource are missing), or a parse error (a literal that does not
//! match its declared datatype, reported with the literal and the field
//! name). Failures inside nested resources carry a trail naming the
//! nested field. See [`error`].

pub mod closure;
pub mod error;
pub mod graph;
pub mod materialize;
pub mod meta;
pub mod ontology;
pub mod resource;
pub mod server;
pub mod spider;
pub mod transport;
pub mod vocabulary;
pub mod watch;
pub mod wire;
