use toxigraph::graph::{Graph, Iri, NodeId, Term, Triple};
use toxigraph::materialize::Materializer;
use toxigraph::meta::{MetaInfo, ResourceRef};
use toxigraph::ontology::{ClassKeeper, PropertyKeeper};
use toxigraph::resource::{Resource, Task, TaskStatus};
use toxigraph::vocabulary::{dc, ot, owl, rdf, rdfs, xsd};

fn keepers() -> (ClassKeeper, PropertyKeeper) {
    (ClassKeeper::standard(), PropertyKeeper::standard())
}

fn declared_as(graph: &Graph, property: &str, kind: &str) -> bool {
    graph.contains(&Triple {
        subject: NodeId::Named(Iri::known(property)),
        predicate: Iri::known(rdf::TYPE),
        object: Term::named(Iri::known(kind)),
    })
}

fn task() -> (Graph, Task) {
    let (classes, properties) = keepers();
    let mut task = Task::new(
        Some(Iri::parse("http://services.example.org/task/1").unwrap()),
        &classes,
    );
    task.set_status(Some(TaskStatus::Running));
    task.set_percentage_completed(Some(42.5));
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_task(&task);
    (graph, task)
}

#[test]
fn used_domain_predicates_are_declared_with_domain_and_range() {
    let (graph, _) = task();
    assert!(declared_as(&graph, ot::HAS_STATUS, owl::DATATYPE_PROPERTY));
    assert!(declared_as(
        &graph,
        ot::PERCENTAGE_COMPLETED,
        owl::DATATYPE_PROPERTY
    ));
    assert!(graph.contains(&Triple {
        subject: NodeId::Named(Iri::known(ot::PERCENTAGE_COMPLETED)),
        predicate: Iri::known(rdfs::DOMAIN),
        object: Term::named(Iri::known(ot::TASK)),
    }));
    assert!(graph.contains(&Triple {
        subject: NodeId::Named(Iri::known(ot::PERCENTAGE_COMPLETED)),
        predicate: Iri::known(rdfs::RANGE),
        object: Term::named(Iri::known(xsd::FLOAT)),
    }));
}

#[test]
fn unused_domain_predicates_are_not_declared() {
    let (graph, _) = task();
    assert!(!declared_as(&graph, ot::RESULT_URI, owl::DATATYPE_PROPERTY));
    assert!(!declared_as(&graph, ot::ERROR_CAUSE, owl::OBJECT_PROPERTY));
}

#[test]
fn builtin_vocabulary_is_never_redeclared() {
    let (classes, properties) = keepers();
    let mut resource = Resource::new(Some(Iri::parse("http://services.example.org/r/1").unwrap()));
    resource.set_meta(
        MetaInfo::default()
            .add_title("titled")
            .add_same_as(ResourceRef::new(
                Iri::parse("http://services.example.org/r/2").unwrap(),
            ))
            .add_has_source(ResourceRef::new(
                Iri::parse("http://services.example.org/dataset/1").unwrap(),
            )),
    );
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach(&resource);

    // the domain-defined predicate is declared
    assert!(declared_as(&graph, ot::HAS_SOURCE, owl::OBJECT_PROPERTY));
    // the built-in ones are used but never declared
    let builtin_declared = graph
        .iter()
        .any(|t| matches!(&t.subject, NodeId::Named(iri)
            if iri.as_str() == dc::TITLE || iri.as_str() == owl::SAME_AS));
    assert!(!builtin_declared);
}

#[test]
fn declarations_are_idempotent_across_attachments() {
    let (classes, properties) = keepers();
    let mut graph = Graph::new();
    let mut materializer = Materializer::new(&mut graph, &classes, &properties);
    for n in 1..=3 {
        let locator = format!("http://services.example.org/task/{n}");
        let mut task = Task::new(Iri::parse(&locator), &classes);
        task.set_status(Some(TaskStatus::Queued));
        materializer.attach_task(&task);
    }
    drop(materializer);
    let declarations = graph
        .iter()
        .filter(|t| {
            t.subject == NodeId::Named(Iri::known(ot::HAS_STATUS))
                && t.predicate.as_str() == rdf::TYPE
        })
        .count();
    assert_eq!(declarations, 1);
}

#[test]
fn absent_metadata_fields_produce_no_edges() {
    let (classes, properties) = keepers();
    let node = Iri::parse("http://services.example.org/r/empty").unwrap();
    let mut resource = Resource::new(Some(node.clone()));
    resource.set_meta(MetaInfo::default().set_titles(std::collections::HashSet::new()));
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach(&resource);

    let edges_from_node = graph
        .iter()
        .filter(|t| t.subject == NodeId::Named(node.clone()))
        .count();
    assert_eq!(edges_from_node, 0, "no classes, no metadata, no edges");
}
