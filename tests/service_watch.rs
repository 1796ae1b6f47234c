use std::sync::Arc;
use std::thread;
use std::time::Duration;

use toxigraph::error::ToxigraphError;
use toxigraph::graph::{Graph, Iri};
use toxigraph::materialize::Materializer;
use toxigraph::ontology::{ClassKeeper, PropertyKeeper};
use toxigraph::resource::{Dataset, Task, TaskStatus};
use toxigraph::spider::retrieve_dataset;
use toxigraph::transport::{Credential, Fetch, InMemoryService, PostOutcome, Publishable};
use toxigraph::watch::{TaskWatcher, WatchOptions};

fn base() -> Iri {
    Iri::parse("http://services.example.org").unwrap()
}

fn task_graph(locator: &Iri, status: TaskStatus, percentage: f32) -> Graph {
    let classes = ClassKeeper::standard();
    let properties = PropertyKeeper::standard();
    let mut task = Task::new(Some(locator.clone()), &classes);
    task.set_status(Some(status));
    task.set_percentage_completed(Some(percentage));
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_task(&task);
    graph
}

#[test]
fn fetching_an_unknown_locator_is_a_transport_error() {
    let service = InMemoryService::new(base());
    let err = service
        .fetch(&base().join("task/404"), None)
        .expect_err("nothing stored");
    match err {
        ToxigraphError::Transport { status, .. } => assert_eq!(status, Some(404)),
        other => panic!("expected a transport error, got {other}"),
    }
}

#[test]
fn credentials_are_checked_before_anything_else() {
    let service = InMemoryService::new(base()).with_token("secret");
    let locator = base().join("task/1");
    service.put_graph(locator.clone(), task_graph(&locator, TaskStatus::Running, 10.0));

    let missing = service.fetch(&locator, None).expect_err("no credential");
    assert!(matches!(missing, ToxigraphError::Unauthorized(_)));

    let wrong = service
        .fetch(&locator, Some(&Credential::new("guess")))
        .expect_err("wrong token");
    assert!(matches!(wrong, ToxigraphError::Unauthorized(_)));

    service
        .fetch(&locator, Some(&Credential::new("secret")))
        .expect("accepted credential");
}

#[test]
fn publishing_stores_a_graph_under_a_minted_locator() {
    let classes = ClassKeeper::standard();
    let properties = PropertyKeeper::standard();
    let service = InMemoryService::new(base());
    let dataset = Dataset::new(Some(base().join("dataset/local")), &classes);

    let outcome = dataset
        .publish(&service, &base().join("dataset"), None, &classes, &properties)
        .expect("post succeeds");
    let created = match outcome {
        PostOutcome::Created(locator) => locator,
        other => panic!("expected a created locator, got {other:?}"),
    };
    assert_eq!(created, base().join("dataset/1"));

    // the stored graph reflects back, located by the resource's own uri
    let fetched = service.fetch(&created, None).expect("stored graph");
    let spider = toxigraph::spider::Spider::new(&fetched, &classes);
    let back = spider
        .reflect(
            &toxigraph::spider::Target::Unique,
            &toxigraph::spider::DatasetExtractor,
        )
        .expect("reflection succeeds");
    assert_eq!(back, dataset);
}

#[test]
fn retrieval_composes_fetch_and_reflection() {
    let classes = ClassKeeper::standard();
    let properties = PropertyKeeper::standard();
    let service = InMemoryService::new(base());
    let locator = base().join("dataset/7");
    let dataset = Dataset::new(Some(locator.clone()), &classes);
    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_dataset(&dataset);
    service.put_graph(locator.clone(), graph);

    let back = retrieve_dataset(&service, &locator, None, &classes).expect("retrieval succeeds");
    assert_eq!(back, dataset);
}

#[test]
fn a_watched_task_streams_snapshots_until_terminal() {
    let classes = Arc::new(ClassKeeper::standard());
    let service = Arc::new(InMemoryService::new(base()));
    let locator = base().join("task/9");
    service.put_graph(locator.clone(), task_graph(&locator, TaskStatus::Running, 30.0));

    let watcher = TaskWatcher::new(Arc::clone(&service), Arc::clone(&classes));
    let handle = watcher.watch(
        locator.clone(),
        None,
        WatchOptions {
            interval: Duration::from_millis(10),
            max_polls: Some(500),
        },
    );

    thread::sleep(Duration::from_millis(60));
    service.put_graph(
        locator.clone(),
        task_graph(&locator, TaskStatus::Completed, 100.0),
    );

    let last = handle.wait().expect("watch completes");
    assert_eq!(last.status(), Some(TaskStatus::Completed));
    assert_eq!(last.percentage_completed(), Some(100.0));
}

#[test]
fn a_watch_can_be_cancelled() {
    let classes = Arc::new(ClassKeeper::standard());
    let service = Arc::new(InMemoryService::new(base()));
    let locator = base().join("task/10");
    service.put_graph(locator.clone(), task_graph(&locator, TaskStatus::Running, 5.0));

    let watcher = TaskWatcher::new(Arc::clone(&service), classes);
    let handle = watcher.watch(
        locator,
        None,
        WatchOptions {
            interval: Duration::from_millis(10),
            max_polls: None,
        },
    );
    let first = handle
        .snapshots
        .recv_timeout(Duration::from_millis(500))
        .expect("at least one snapshot");
    assert_eq!(first.status(), Some(TaskStatus::Running));

    handle.cancel();
    let err = handle.wait().expect_err("cancelled watch");
    assert!(matches!(err, ToxigraphError::Interrupted(_)));
}

#[test]
fn a_failing_fetch_ends_the_watch_with_that_error() {
    let classes = Arc::new(ClassKeeper::standard());
    let service = Arc::new(InMemoryService::new(base()));
    let watcher = TaskWatcher::new(service, classes);
    let handle = watcher.watch(base().join("task/404"), None, WatchOptions::default());
    let err = handle.wait().expect_err("nothing stored");
    assert!(matches!(err, ToxigraphError::Transport { .. }));
}
