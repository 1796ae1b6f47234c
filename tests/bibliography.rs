use toxigraph::error::ToxigraphError;
use toxigraph::graph::{Graph, Iri, Literal, NodeId, Primitive, Term};
use toxigraph::ontology::ClassKeeper;
use toxigraph::resource::EntryKind;
use toxigraph::spider::{BibExtractor, Spider, Target};
use toxigraph::vocabulary::{bibtex, rdf};

fn entry_node() -> NodeId {
    NodeId::Named(Iri::parse("http://services.example.org/bibtex/3").unwrap())
}

fn insert(graph: &mut Graph, subject: &NodeId, predicate: &str, object: Term) {
    graph.insert(subject.clone(), Iri::known(predicate), object);
}

#[test]
fn an_article_reflects_with_its_fields() {
    let classes = ClassKeeper::standard();
    let mut graph = Graph::new();
    let node = entry_node();
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(bibtex::ARTICLE)),
    );
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(bibtex::ENTRY)),
    );
    insert(
        &mut graph,
        &node,
        bibtex::HAS_AUTHOR,
        Term::Literal(Literal::string("Kazius, J.")),
    );
    insert(
        &mut graph,
        &node,
        bibtex::HAS_TITLE,
        Term::Literal(Literal::string("Derivation of toxicophores")),
    );
    insert(
        &mut graph,
        &node,
        bibtex::HAS_YEAR,
        Term::Literal(Literal::typed("2005", Primitive::Integer)),
    );

    let entry = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &BibExtractor)
        .expect("reflection succeeds");
    assert_eq!(entry.kind(), EntryKind::Article);
    assert_eq!(entry.author(), Some("Kazius, J."));
    assert_eq!(entry.title(), Some("Derivation of toxicophores"));
    assert_eq!(entry.year(), Some(2005));
    assert!(entry.journal().is_none());
}

#[test]
fn a_record_without_a_recognizable_entry_type_is_structural() {
    let classes = ClassKeeper::standard();
    let mut graph = Graph::new();
    let node = entry_node();
    // typed only with the umbrella class, never with a concrete kind
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(bibtex::ENTRY)),
    );
    insert(
        &mut graph,
        &node,
        bibtex::HAS_TITLE,
        Term::Literal(Literal::string("untitled")),
    );

    let err = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &BibExtractor)
        .expect_err("no entry type");
    match err {
        ToxigraphError::Structural { message, .. } => {
            assert!(message.contains("entry type"), "got: {message}");
        }
        other => panic!("expected a structural error, got {other}"),
    }
}

#[test]
fn a_non_numeric_year_is_a_parse_error_with_the_field_name() {
    let classes = ClassKeeper::standard();
    let mut graph = Graph::new();
    let node = entry_node();
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(bibtex::ARTICLE)),
    );
    insert(
        &mut graph,
        &node,
        bibtex::HAS_YEAR,
        Term::Literal(Literal::typed("MMXX", Primitive::Integer)),
    );

    let err = Spider::new(&graph, &classes)
        .reflect(
            &Target::Located(entry_node().iri().cloned().unwrap()),
            &BibExtractor,
        )
        .expect_err("roman numerals");
    match err {
        ToxigraphError::Parse { literal, field, .. } => {
            assert_eq!(literal, "MMXX");
            assert_eq!(field, "hasYear");
        }
        other => panic!("expected a parse error, got {other}"),
    }
}
