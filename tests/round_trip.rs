use chrono::NaiveDate;
use toxigraph::graph::{Graph, Iri, Literal};
use toxigraph::materialize::Materializer;
use toxigraph::meta::{MetaInfo, ResourceRef};
use toxigraph::ontology::{ClassKeeper, PropertyKeeper};
use toxigraph::resource::{
    BibEntry, DataEntry, Dataset, EntryKind, ErrorReport, Feature, FeatureValue, Parameter,
    ParameterScope, Task, TaskStatus,
};
use toxigraph::spider::{
    AlgorithmExtractor, BibExtractor, DatasetExtractor, FeatureExtractor, Spider, Target,
    TaskExtractor,
};
use toxigraph::vocabulary::ot;

fn keepers() -> (ClassKeeper, PropertyKeeper) {
    (ClassKeeper::standard(), PropertyKeeper::standard())
}

fn iri(s: &str) -> Iri {
    Iri::parse(s).expect("valid locator")
}

#[test]
fn task_round_trips_with_metadata_and_error_report() {
    let (classes, properties) = keepers();
    let mut task = Task::new(Some(iri("http://services.example.org/task/77")), &classes);
    task.resource_mut().set_meta(
        MetaInfo::default()
            .add_title("lazar regression")
            .add_title("training run")
            .add_creator("alice")
            .with_date(
                NaiveDate::from_ymd_opt(2026, 8, 6)
                    .unwrap()
                    .and_hms_opt(12, 30, 0)
                    .unwrap(),
            )
            .add_same_as(ResourceRef::classified(
                iri("http://services.example.org/dataset/9"),
                Iri::known(ot::DATASET),
            )),
    );
    task.set_status(Some(TaskStatus::Error));
    task.set_percentage_completed(Some(71.5));
    task.set_result_uri(Some(iri("http://services.example.org/model/3")));
    let mut cause = ErrorReport::new(None, &classes);
    cause.set_message(Some("division by zero".into()));
    let mut report = ErrorReport::new(None, &classes);
    report.set_actor(Some("http://services.example.org".into()));
    report.set_http_status(Some(500));
    report.set_error_cause(Some(cause));
    task.set_error_report(Some(report));

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_task(&task);

    let spider = Spider::new(&graph, &classes);
    let back = spider
        .reflect(
            &Target::Located(iri("http://services.example.org/task/77")),
            &TaskExtractor,
        )
        .expect("reflection succeeds");
    assert_eq!(back, task);
}

#[test]
fn metadata_equality_survives_insertion_order() {
    let (classes, properties) = keepers();
    let mut one = Feature::new(Some(iri("http://services.example.org/feature/1")), &classes);
    one.resource_mut()
        .set_meta(MetaInfo::default().add_title("x").add_title("y"));
    let mut other = Feature::new(Some(iri("http://services.example.org/feature/1")), &classes);
    other
        .resource_mut()
        .set_meta(MetaInfo::default().add_title("y").add_title("x"));

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_feature(&one);
    let spider = Spider::new(&graph, &classes);
    let back = spider
        .reflect(&Target::Unique, &FeatureExtractor)
        .expect("reflection succeeds");
    assert_eq!(back, one);
    assert_eq!(back, other, "reflected metadata compares as a set");
}

#[test]
fn feature_round_trips_with_units() {
    let (classes, properties) = keepers();
    let mut feature = Feature::new(Some(iri("http://services.example.org/feature/42")), &classes);
    feature.set_units(Some("mg/L".into()));
    feature
        .resource_mut()
        .set_meta(MetaInfo::default().add_comment("median lethal concentration"));

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_feature(&feature);
    let back = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &FeatureExtractor)
        .expect("reflection succeeds");
    assert_eq!(back, feature);
}

#[test]
fn algorithm_round_trips_with_parameters() {
    let (classes, properties) = keepers();
    let mut algorithm = toxigraph::resource::Algorithm::new(
        Some(iri("http://services.example.org/algorithm/lazar")),
        &classes,
    );
    let mut threshold = Parameter::new(None, &classes);
    threshold.set_scope(ParameterScope::Mandatory);
    threshold.set_value(Some(Literal::double(0.85)));
    threshold
        .resource_mut()
        .set_meta(MetaInfo::default().add_title("similarity threshold"));
    let mut neighbours = Parameter::new(None, &classes);
    neighbours.set_value(Some(Literal::integer(5)));
    algorithm.add_parameter(threshold);
    algorithm.add_parameter(neighbours);

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_algorithm(&algorithm);
    let back = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &AlgorithmExtractor)
        .expect("reflection succeeds");
    assert_eq!(back, algorithm);
}

#[test]
fn dataset_round_trips_with_entries() {
    let (classes, properties) = keepers();
    let mut feature = Feature::new(Some(iri("http://services.example.org/feature/logp")), &classes);
    feature.set_units(Some("dimensionless".into()));
    let mut entry = DataEntry::new();
    entry.set_conformer(Some(iri("http://services.example.org/compound/benzene")));
    entry.add_value(FeatureValue::new(feature, Literal::double(2.13)));
    let mut dataset = Dataset::new(Some(iri("http://services.example.org/dataset/12")), &classes);
    dataset.add_entry(entry);

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_dataset(&dataset);
    let back = Spider::new(&graph, &classes)
        .reflect(&Target::Unique, &DatasetExtractor)
        .expect("reflection succeeds");
    assert_eq!(back, dataset);
}

#[test]
fn bibliography_round_trips() {
    let (classes, properties) = keepers();
    let mut entry = BibEntry::new(
        Some(iri("http://services.example.org/bibtex/17")),
        EntryKind::Article,
    );
    entry.set_author(Some("Hansch, C.".into()));
    entry.set_title(Some("p-sigma-pi analysis".into()));
    entry.set_journal(Some("J. Am. Chem. Soc.".into()));
    entry.set_year(Some(1964));
    entry.set_pages(Some("1616-1626".into()));
    entry.set_url(Some(iri("http://doi.org/10.1021/ja01062a035")));

    let mut graph = Graph::new();
    Materializer::new(&mut graph, &classes, &properties).attach_bibliography(&entry);
    let back = Spider::new(&graph, &classes)
        .reflect(
            &Target::Located(iri("http://services.example.org/bibtex/17")),
            &BibExtractor,
        )
        .expect("reflection succeeds");
    assert_eq!(back, entry);
}
