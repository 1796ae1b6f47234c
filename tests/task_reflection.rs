use toxigraph::error::ToxigraphError;
use toxigraph::graph::{Graph, Iri, Literal, NodeId, Primitive, Term};
use toxigraph::ontology::ClassKeeper;
use toxigraph::resource::TaskStatus;
use toxigraph::spider::{Spider, Target, TaskExtractor};
use toxigraph::vocabulary::{ot, rdf};

fn task_node() -> NodeId {
    NodeId::Named(Iri::parse("http://services.example.org/task/5").unwrap())
}

fn insert(graph: &mut Graph, subject: &NodeId, predicate: &str, object: Term) {
    graph.insert(subject.clone(), Iri::known(predicate), object);
}

// a running task: status and percentage present, result and error absent
fn running_task_graph() -> Graph {
    let mut graph = Graph::new();
    let node = task_node();
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(ot::TASK)),
    );
    insert(
        &mut graph,
        &node,
        ot::HAS_STATUS,
        Term::Literal(Literal::string("RUNNING")),
    );
    insert(
        &mut graph,
        &node,
        ot::PERCENTAGE_COMPLETED,
        Term::Literal(Literal::typed("42.5", Primitive::Float)),
    );
    graph
}

#[test]
fn absent_optional_predicates_are_not_errors() {
    let classes = ClassKeeper::standard();
    let graph = running_task_graph();
    let task = Spider::new(&graph, &classes)
        .reflect(&Target::Located(task_node().iri().cloned().unwrap()), &TaskExtractor)
        .expect("reflection succeeds");
    assert_eq!(task.status(), Some(TaskStatus::Running));
    assert_eq!(task.percentage_completed(), Some(42.5));
    assert!(task.result_uri().is_none());
    assert!(task.error_report().is_none());
}

#[test]
fn the_unique_instance_can_be_located_without_a_locator() {
    let classes = ClassKeeper::standard();
    let graph = running_task_graph();
    let task = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &TaskExtractor)
        .expect("reflection succeeds");
    assert_eq!(task.status(), Some(TaskStatus::Running));
}

#[test]
fn an_unknown_status_literal_is_a_parse_error() {
    let classes = ClassKeeper::standard();
    let mut graph = Graph::new();
    let node = task_node();
    insert(
        &mut graph,
        &node,
        rdf::TYPE,
        Term::named(Iri::known(ot::TASK)),
    );
    insert(
        &mut graph,
        &node,
        ot::HAS_STATUS,
        Term::Literal(Literal::string("BOGUS")),
    );
    let err = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &TaskExtractor)
        .expect_err("unparsable status");
    match err {
        ToxigraphError::Parse {
            literal, field, ..
        } => {
            assert_eq!(literal, "BOGUS");
            assert_eq!(field, "hasStatus");
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn nested_failures_carry_a_trail() {
    let classes = ClassKeeper::standard();
    let mut graph = running_task_graph();
    let node = task_node();
    let report = NodeId::Blank("b900".into());
    let cause = NodeId::Blank("b901".into());
    insert(
        &mut graph,
        &node,
        ot::ERROR_REPORT_PROP,
        Term::Node(report.clone()),
    );
    insert(
        &mut graph,
        &report,
        rdf::TYPE,
        Term::named(Iri::known(ot::ERROR_REPORT)),
    );
    insert(
        &mut graph,
        &report,
        ot::ERROR_CAUSE,
        Term::Node(cause.clone()),
    );
    insert(
        &mut graph,
        &cause,
        ot::HTTP_STATUS,
        Term::Literal(Literal::typed("abc", Primitive::Integer)),
    );

    let err = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &TaskExtractor)
        .expect_err("nested parse failure");
    match &err {
        ToxigraphError::Parse { trail, field, .. } => {
            assert_eq!(trail.to_string(), "errorReport.errorCause");
            assert_eq!(field, "httpStatus");
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn a_missing_target_is_a_structural_error() {
    let classes = ClassKeeper::standard();
    let graph = running_task_graph();
    let err = Spider::new(&graph, &classes)
        .reflect(
            &Target::Located(Iri::parse("http://services.example.org/task/404").unwrap()),
            &TaskExtractor,
        )
        .expect_err("nothing there");
    assert!(matches!(err, ToxigraphError::Structural { .. }));
}

#[test]
fn ambiguous_unique_location_is_a_structural_error() {
    let classes = ClassKeeper::standard();
    let mut graph = running_task_graph();
    let second = NodeId::Named(Iri::parse("http://services.example.org/task/6").unwrap());
    insert(
        &mut graph,
        &second,
        rdf::TYPE,
        Term::named(Iri::known(ot::TASK)),
    );
    let err = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &TaskExtractor)
        .expect_err("two candidates");
    match err {
        ToxigraphError::Structural { message, .. } => {
            assert!(message.contains("2 instances"), "got: {message}");
        }
        other => panic!("expected a structural error, got {other}"),
    }
}
