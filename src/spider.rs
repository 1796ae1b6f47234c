//! Reads typed resources back out of a graph.
//!
//! Every reflection runs the same route — locate the target node,
//! classify it through the type closure, read its metadata, follow its
//! reference edges, assemble the typed object. What differs between
//! resource kinds is only which edges are followed and which concrete
//! type comes out, so the route is one generic traversal parameterized
//! by an [`Extractor`] per kind.
//!
//! A missing optional predicate is never an error. A parse failure on
//! one scalar does not stop the sibling scalars from being read; the
//! first failure is returned once the node's scalars are done. Errors
//! inside nested resources come back with a trail naming the nested
//! field.

use std::collections::HashSet;

use tracing::debug;

use crate::closure;
use crate::error::{Result, ToxigraphError, Trail};
use crate::graph::{Graph, GraphHasher, Iri, Literal, NodeId};
use crate::meta::{MetaInfo, ResourceRef};
use crate::ontology::ClassKeeper;
use crate::resource::{
    Algorithm, BibEntry, DataEntry, Dataset, EntryKind, ErrorReport, Feature, FeatureValue,
    Parameter, ParameterScope, Resource, Task, TaskStatus,
};
use crate::transport::{Credential, Fetch};
use crate::vocabulary::{bibtex, dc, dcterms, ot, owl, rdfs};

/// How to find the node to reflect.
#[derive(Clone, Debug)]
pub enum Target {
    /// The node named by this locator.
    Located(Iri),
    /// The unique instance of the extractor's expected class.
    Unique,
}

fn parse_error(literal: &Literal, expected: &'static str, field: &str) -> ToxigraphError {
    ToxigraphError::Parse {
        trail: Trail::root(),
        literal: literal.lexical().to_owned(),
        expected,
        field: field.to_owned(),
    }
}

/// Remembers the first failure while letting sibling fields continue.
pub fn note<T>(first: &mut Option<ToxigraphError>, outcome: Result<Option<T>>) -> Option<T> {
    match outcome {
        Ok(value) => value,
        Err(e) => {
            if first.is_none() {
                *first = Some(e);
            }
            None
        }
    }
}

/// The per-kind extraction strategy: which class identifies the kind,
/// which edges to follow, which concrete type to assemble.
pub trait Extractor {
    type Output;

    /// The class used when locating by uniqueness; `None` for kinds
    /// that can only be located by explicit locator.
    fn expected_class(&self) -> Option<&'static str> {
        None
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Self::Output>;
}

pub struct Spider<'g> {
    graph: &'g Graph,
    classes: &'g ClassKeeper,
}

impl<'g> Spider<'g> {
    pub fn new(graph: &'g Graph, classes: &'g ClassKeeper) -> Self {
        Self { graph, classes }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Runs the full route for one target node.
    pub fn reflect<E: Extractor>(&self, target: &Target, extractor: &E) -> Result<E::Output> {
        let node = self.locate(target, extractor.expected_class())?;
        self.descend(&node, extractor)
    }

    /// Reflects at a node that is already in hand (used for nested
    /// references).
    pub fn descend<E: Extractor>(&self, node: &NodeId, extractor: &E) -> Result<E::Output> {
        let asserted = self.graph.types_of(node);
        let resolved = closure::resolve(&asserted, self.classes);
        let meta = self.read_meta(node)?;
        let mut resource = Resource::new(node.iri().cloned());
        resource.set_meta(meta);
        resource.set_classes(resolved);
        extractor.extract(self, node, &asserted, resource)
    }

    fn locate(&self, target: &Target, expected: Option<&'static str>) -> Result<NodeId> {
        match target {
            Target::Located(iri) => {
                let node = NodeId::Named(iri.clone());
                if self.graph.has_subject(&node) {
                    Ok(node)
                } else {
                    Err(ToxigraphError::structural(format!(
                        "no statements about <{}>",
                        iri
                    )))
                }
            }
            Target::Unique => {
                let Some(class) = expected else {
                    return Err(ToxigraphError::structural(
                        "this resource kind cannot be located by class",
                    ));
                };
                let mut found = self.graph.subjects_typed(class);
                match found.len() {
                    1 => Ok(found.remove(0)),
                    0 => Err(ToxigraphError::structural(format!(
                        "no instance of <{}>",
                        class
                    ))),
                    n => Err(ToxigraphError::structural(format!(
                        "{} instances of <{}>, expected exactly one",
                        n, class
                    ))),
                }
            }
        }
    }

    // ------------- metadata -------------
    fn literal_set(&self, node: &NodeId, predicate: &str) -> Option<HashSet<String>> {
        let values: HashSet<String> = self
            .graph
            .literal_objects(node, predicate)
            .map(|l| l.lexical().to_owned())
            .collect();
        if values.is_empty() { None } else { Some(values) }
    }

    fn ref_set(&self, node: &NodeId, predicate: &str) -> Option<HashSet<ResourceRef>> {
        let mut refs = HashSet::new();
        for target in self.graph.node_objects(node, predicate) {
            let Some(uri) = target.iri().cloned() else {
                debug!(%target, "anonymous node in a resource-valued field, skipped");
                continue;
            };
            // deterministic pick when the remote asserts several types
            let class = self.graph.types_of(&target).into_iter().min();
            refs.insert(match class {
                Some(class) => ResourceRef::classified(uri, class),
                None => ResourceRef::new(uri),
            });
        }
        if refs.is_empty() { None } else { Some(refs) }
    }

    fn read_meta(&self, node: &NodeId) -> Result<MetaInfo> {
        let mut meta = MetaInfo::default();
        if let Some(s) = self.literal_set(node, dc::IDENTIFIER) {
            meta = meta.set_identifiers(s);
        }
        if let Some(s) = self.literal_set(node, dc::TITLE) {
            meta = meta.set_titles(s);
        }
        if let Some(s) = self.literal_set(node, rdfs::COMMENT) {
            meta = meta.set_comments(s);
        }
        if let Some(s) = self.literal_set(node, dc::DESCRIPTION) {
            meta = meta.set_descriptions(s);
        }
        if let Some(s) = self.literal_set(node, dc::SUBJECT) {
            meta = meta.set_subjects(s);
        }
        if let Some(s) = self.literal_set(node, dc::PUBLISHER) {
            meta = meta.set_publishers(s);
        }
        if let Some(s) = self.literal_set(node, dc::CREATOR) {
            meta = meta.set_creators(s);
        }
        if let Some(s) = self.literal_set(node, dc::CONTRIBUTOR) {
            meta = meta.set_contributors(s);
        }
        if let Some(s) = self.literal_set(node, dcterms::AUDIENCE) {
            meta = meta.set_audiences(s);
        }
        if let Some(s) = self.literal_set(node, dc::RIGHTS) {
            meta = meta.set_rights(s);
        }
        let mut first = None;
        if let Some(literal) = self.graph.literal_object(node, dc::DATE) {
            match literal.as_date_time() {
                Some(date) => meta.set_date(Some(date)),
                None => {
                    note::<()>(&mut first, Err(parse_error(literal, "dateTime", "date")));
                }
            }
        }
        if let Some(refs) = self.ref_set(node, owl::SAME_AS) {
            meta = meta.set_same_as(refs);
        }
        if let Some(refs) = self.ref_set(node, rdfs::SEE_ALSO) {
            meta = meta.set_see_also(refs);
        }
        if let Some(refs) = self.ref_set(node, ot::HAS_SOURCE) {
            meta = meta.set_has_sources(refs);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(meta),
        }
    }

    // ------------- edges -------------
    pub fn follow(&self, node: &NodeId, predicate: &str) -> Vec<NodeId> {
        self.graph.node_objects(node, predicate)
    }

    pub fn follow_one(&self, node: &NodeId, predicate: &str) -> Option<NodeId> {
        self.graph.node_objects(node, predicate).into_iter().next()
    }

    // ------------- scalar fields -------------
    pub fn optional_string(&self, node: &NodeId, predicate: &str) -> Option<String> {
        self.graph
            .literal_object(node, predicate)
            .map(|l| l.lexical().to_owned())
    }

    pub fn float_field(
        &self,
        node: &NodeId,
        predicate: &str,
        field: &'static str,
    ) -> Result<Option<f32>> {
        match self.graph.literal_object(node, predicate) {
            Some(literal) => match literal.as_f32() {
                Some(value) => Ok(Some(value)),
                None => Err(parse_error(literal, "float", field)),
            },
            None => Ok(None),
        }
    }

    pub fn u16_field(
        &self,
        node: &NodeId,
        predicate: &str,
        field: &'static str,
    ) -> Result<Option<u16>> {
        match self.graph.literal_object(node, predicate) {
            Some(literal) => match literal.as_i64().and_then(|v| u16::try_from(v).ok()) {
                Some(value) => Ok(Some(value)),
                None => Err(parse_error(literal, "integer", field)),
            },
            None => Ok(None),
        }
    }

    pub fn uri_field(
        &self,
        node: &NodeId,
        predicate: &str,
        field: &'static str,
    ) -> Result<Option<Iri>> {
        match self.graph.literal_object(node, predicate) {
            Some(literal) => match literal.as_iri() {
                Some(value) => Ok(Some(value)),
                None => Err(parse_error(literal, "anyURI", field)),
            },
            None => Ok(None),
        }
    }

    pub fn status_field(
        &self,
        node: &NodeId,
        predicate: &str,
        field: &'static str,
    ) -> Result<Option<TaskStatus>> {
        match self.graph.literal_object(node, predicate) {
            Some(literal) => match TaskStatus::from_wire(literal.lexical()) {
                Some(value) => Ok(Some(value)),
                None => Err(parse_error(literal, "task status", field)),
            },
            None => Ok(None),
        }
    }

    pub fn scope_field(
        &self,
        node: &NodeId,
        predicate: &str,
        field: &'static str,
    ) -> Result<Option<ParameterScope>> {
        match self.graph.literal_object(node, predicate) {
            Some(literal) => match ParameterScope::from_wire(literal.lexical()) {
                Some(value) => Ok(Some(value)),
                None => Err(parse_error(literal, "parameter scope", field)),
            },
            None => Ok(None),
        }
    }
}

// ------------- per-kind extractors -------------
pub struct TaskExtractor;

impl Extractor for TaskExtractor {
    type Output = Task;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::TASK)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Task> {
        let mut first = None;
        let status = note(&mut first, spider.status_field(node, ot::HAS_STATUS, "hasStatus"));
        let percentage = note(
            &mut first,
            spider.float_field(node, ot::PERCENTAGE_COMPLETED, "percentageCompleted"),
        );
        let result_uri = note(&mut first, spider.uri_field(node, ot::RESULT_URI, "resultURI"));
        if let Some(e) = first {
            return Err(e);
        }
        let error_report = match spider.follow_one(node, ot::ERROR_REPORT_PROP) {
            Some(child) => Some(
                spider
                    .descend(&child, &ErrorReportExtractor)
                    .map_err(|e| e.via("errorReport"))?,
            ),
            None => None,
        };
        let mut task = Task::from_resource(resource);
        task.set_status(status);
        task.set_percentage_completed(percentage);
        task.set_result_uri(result_uri);
        task.set_error_report(error_report);
        Ok(task)
    }
}

pub struct ErrorReportExtractor;

impl Extractor for ErrorReportExtractor {
    type Output = ErrorReport;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::ERROR_REPORT)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<ErrorReport> {
        let mut first = None;
        let http_status = note(&mut first, spider.u16_field(node, ot::HTTP_STATUS, "httpStatus"));
        let actor = spider.optional_string(node, ot::ACTOR);
        let message = spider.optional_string(node, ot::MESSAGE);
        let details = spider.optional_string(node, ot::DETAILS);
        if let Some(e) = first {
            return Err(e);
        }
        let cause = match spider.follow_one(node, ot::ERROR_CAUSE) {
            Some(child) => Some(
                spider
                    .descend(&child, &ErrorReportExtractor)
                    .map_err(|e| e.via("errorCause"))?,
            ),
            None => None,
        };
        let mut report = ErrorReport::from_resource(resource);
        report.set_actor(actor);
        report.set_message(message);
        report.set_details(details);
        report.set_http_status(http_status);
        report.set_error_cause(cause);
        Ok(report)
    }
}

pub struct FeatureExtractor;

impl Extractor for FeatureExtractor {
    type Output = Feature;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::FEATURE)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Feature> {
        let mut feature = Feature::from_resource(resource);
        feature.set_units(spider.optional_string(node, ot::UNITS));
        Ok(feature)
    }
}

pub struct ParameterExtractor;

impl Extractor for ParameterExtractor {
    type Output = Parameter;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::PARAMETER)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Parameter> {
        let mut first = None;
        let scope = note(&mut first, spider.scope_field(node, ot::PARAM_SCOPE, "paramScope"));
        if let Some(e) = first {
            return Err(e);
        }
        let mut parameter = Parameter::from_resource(resource);
        parameter.set_scope(scope.unwrap_or_default());
        parameter.set_value(
            spider
                .graph()
                .literal_object(node, ot::PARAM_VALUE)
                .cloned(),
        );
        Ok(parameter)
    }
}

pub struct AlgorithmExtractor;

impl Extractor for AlgorithmExtractor {
    type Output = Algorithm;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::ALGORITHM)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Algorithm> {
        let mut algorithm = Algorithm::from_resource(resource);
        for child in spider.follow(node, ot::PARAMETERS) {
            let parameter = spider
                .descend(&child, &ParameterExtractor)
                .map_err(|e| e.via("parameters"))?;
            algorithm.add_parameter(parameter);
        }
        Ok(algorithm)
    }
}

pub struct DatasetExtractor;

impl Extractor for DatasetExtractor {
    type Output = Dataset;

    fn expected_class(&self) -> Option<&'static str> {
        Some(ot::DATASET)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        _asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<Dataset> {
        let mut dataset = Dataset::from_resource(resource);
        for entry_node in spider.follow(node, ot::DATA_ENTRY_PROP) {
            let entry = read_entry(spider, &entry_node).map_err(|e| e.via("dataEntry"))?;
            dataset.add_entry(entry);
        }
        Ok(dataset)
    }
}

fn read_entry(spider: &Spider, entry_node: &NodeId) -> Result<DataEntry> {
    let mut entry = DataEntry::new();
    entry.set_conformer(
        spider
            .follow_one(entry_node, ot::COMPOUND_PROP)
            .and_then(|n| n.iri().cloned()),
    );
    for value_node in spider.follow(entry_node, ot::VALUES) {
        let value = read_feature_value(spider, &value_node).map_err(|e| e.via("values"))?;
        entry.add_value(value);
    }
    Ok(entry)
}

fn read_feature_value(spider: &Spider, value_node: &NodeId) -> Result<FeatureValue> {
    let feature_node = spider
        .follow_one(value_node, ot::FEATURE_PROP)
        .ok_or_else(|| ToxigraphError::structural("feature value without a feature"))?;
    let feature = spider
        .descend(&feature_node, &FeatureExtractor)
        .map_err(|e| e.via("feature"))?;
    let literal = spider
        .graph()
        .literal_object(value_node, ot::VALUE)
        .ok_or_else(|| ToxigraphError::structural("feature value without a value"))?;
    Ok(FeatureValue::new(feature, literal.clone()))
}

pub struct BibExtractor;

impl Extractor for BibExtractor {
    type Output = BibEntry;

    fn expected_class(&self) -> Option<&'static str> {
        Some(bibtex::ENTRY)
    }

    fn extract(
        &self,
        spider: &Spider,
        node: &NodeId,
        asserted: &HashSet<Iri, GraphHasher>,
        resource: Resource,
    ) -> Result<BibEntry> {
        // the entry type lives among the raw asserted classes, outside
        // the classified namespace
        let mut types: Vec<&Iri> = asserted.iter().collect();
        types.sort();
        let kind = types
            .into_iter()
            .find_map(|uri| EntryKind::from_uri(uri.as_str()))
            .ok_or_else(|| {
                ToxigraphError::structural("no recognizable entry type among asserted classes")
            })?;
        let mut first = None;
        let year = note(&mut first, spider.u16_field(node, bibtex::HAS_YEAR, "hasYear"));
        let url = note(&mut first, spider.uri_field(node, bibtex::HAS_URL, "hasURL"));
        let author = spider.optional_string(node, bibtex::HAS_AUTHOR);
        let title = spider.optional_string(node, bibtex::HAS_TITLE);
        let journal = spider.optional_string(node, bibtex::HAS_JOURNAL);
        let book_title = spider.optional_string(node, bibtex::HAS_BOOKTITLE);
        let pages = spider.optional_string(node, bibtex::HAS_PAGES);
        let abstract_text = spider.optional_string(node, bibtex::HAS_ABSTRACT);
        if let Some(e) = first {
            return Err(e);
        }
        let mut entry = BibEntry::from_resource(resource, kind);
        entry.set_author(author);
        entry.set_title(title);
        entry.set_journal(journal);
        entry.set_book_title(book_title);
        entry.set_year(year);
        entry.set_pages(pages);
        entry.set_abstract_text(abstract_text);
        entry.set_url(url);
        Ok(entry)
    }
}

// ------------- fetch-and-reflect -------------
/// The inbound path in one call: fetch the locator's graph through the
/// transport collaborator, then reflect the named node out of it.
pub fn retrieve<E: Extractor>(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
    extractor: &E,
) -> Result<E::Output> {
    let graph = service.fetch(locator, credential)?;
    Spider::new(&graph, classes).reflect(&Target::Located(locator.clone()), extractor)
}

pub fn retrieve_task(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
) -> Result<Task> {
    retrieve(service, locator, credential, classes, &TaskExtractor)
}

pub fn retrieve_dataset(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
) -> Result<Dataset> {
    retrieve(service, locator, credential, classes, &DatasetExtractor)
}

pub fn retrieve_feature(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
) -> Result<Feature> {
    retrieve(service, locator, credential, classes, &FeatureExtractor)
}

pub fn retrieve_algorithm(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
) -> Result<Algorithm> {
    retrieve(service, locator, credential, classes, &AlgorithmExtractor)
}

pub fn retrieve_bibliography(
    service: &dyn Fetch,
    locator: &Iri,
    credential: Option<&Credential>,
    classes: &ClassKeeper,
) -> Result<BibEntry> {
    retrieve(service, locator, credential, classes, &BibExtractor)
}
