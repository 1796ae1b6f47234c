use toxigraph::graph::{Graph, Iri, NodeId, Term, Triple};
use toxigraph::materialize::Materializer;
use toxigraph::ontology::{ClassKeeper, OntologicalClass, PropertyKeeper};
use toxigraph::resource::Resource;
use toxigraph::vocabulary::{owl, rdf, rdfs};

const NS: &str = "http://example.org/vocab#";

fn class_uri(name: &str) -> Iri {
    Iri::known(&format!("{}{}", NS, name))
}

fn typed_as_class(name: &str) -> Triple {
    Triple {
        subject: NodeId::Named(class_uri(name)),
        predicate: Iri::known(rdf::TYPE),
        object: Term::named(Iri::known(owl::CLASS)),
    }
}

fn sub_class_edge(child: &str, parent: &str) -> Triple {
    Triple {
        subject: NodeId::Named(class_uri(child)),
        predicate: Iri::known(rdfs::SUB_CLASS_OF),
        object: Term::named(class_uri(parent)),
    }
}

// C has two distinct paths to the ancestor A: C -> P1 -> A and C -> P2 -> A
fn diamond() -> ClassKeeper {
    let mut keeper = ClassKeeper::new(NS);
    keeper.keep(OntologicalClass::new(NS, "A"));
    keeper.keep(OntologicalClass::new(NS, "P1").with_super(class_uri("A")));
    keeper.keep(OntologicalClass::new(NS, "P2").with_super(class_uri("A")));
    keeper.keep(
        OntologicalClass::new(NS, "C")
            .with_super(class_uri("P1"))
            .with_super(class_uri("P2")),
    );
    keeper
}

fn resource_of(keeper: &ClassKeeper, name: &str) -> Resource {
    let mut resource = Resource::new(Some(Iri::known("http://example.org/things/1")));
    resource.add_class(keeper.by_name(name).expect("registered class"));
    resource
}

#[test]
fn shared_ancestor_is_emitted_exactly_once() {
    let keeper = diamond();
    let properties = PropertyKeeper::new();
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &keeper, &properties).attach(&resource_of(&keeper, "C"));

    let ancestor_nodes = graph
        .iter()
        .filter(|t| **t == typed_as_class("A"))
        .count();
    assert_eq!(ancestor_nodes, 1, "one class node for the shared ancestor");
    assert!(graph.contains(&sub_class_edge("C", "P1")));
    assert!(graph.contains(&sub_class_edge("C", "P2")));
    assert!(graph.contains(&sub_class_edge("P1", "A")));
    assert!(graph.contains(&sub_class_edge("P2", "A")));
}

#[test]
fn cyclic_hierarchy_terminates_with_both_edges() {
    let mut keeper = ClassKeeper::new(NS);
    keeper.keep(OntologicalClass::new(NS, "A").with_super(class_uri("B")));
    keeper.keep(OntologicalClass::new(NS, "B").with_super(class_uri("A")));
    let properties = PropertyKeeper::new();

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &keeper, &properties).attach(&resource_of(&keeper, "A"));

    assert!(graph.contains(&typed_as_class("A")));
    assert!(graph.contains(&typed_as_class("B")));
    assert!(graph.contains(&sub_class_edge("A", "B")));
    assert!(graph.contains(&sub_class_edge("B", "A")));
}

#[test]
fn later_calls_are_not_suppressed_by_earlier_ones() {
    let keeper = diamond();
    let properties = PropertyKeeper::new();

    let mut graph = Graph::new();
    let mut materializer = Materializer::new(&mut graph, &keeper, &properties);
    materializer.attach(&resource_of(&keeper, "C"));
    materializer.attach(&resource_of(&keeper, "P1"));
    drop(materializer);
    assert_eq!(
        graph.iter().filter(|t| **t == typed_as_class("A")).count(),
        1,
        "the graph itself deduplicates repeated emission"
    );

    // a second materialization into a fresh graph emits everything again
    let mut fresh = Graph::new();
    Materializer::new(&mut fresh, &keeper, &properties).attach(&resource_of(&keeper, "C"));
    assert!(fresh.contains(&typed_as_class("A")));
    assert!(fresh.contains(&typed_as_class("C")));
}

#[test]
fn disjoint_edges_are_written() {
    let mut keeper = ClassKeeper::new(NS);
    keeper.keep(OntologicalClass::new(NS, "A").with_disjoint(class_uri("B")));
    keeper.keep(OntologicalClass::new(NS, "B"));
    let properties = PropertyKeeper::new();

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &keeper, &properties).attach(&resource_of(&keeper, "A"));
    assert!(graph.contains(&Triple {
        subject: NodeId::Named(class_uri("A")),
        predicate: Iri::known(owl::DISJOINT_WITH),
        object: Term::named(class_uri("B")),
    }));
}
