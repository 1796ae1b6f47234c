//! The generic domain resource and the typed kinds built on top of it.
//!
//! One concrete [`Resource`] carries what every kind shares (locator,
//! metadata, class memberships, enabled flag); each kind adds its own
//! enumerated fields. Kinds never share state — a nested resource is
//! owned by its parent outright.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::graph::{Iri, Literal};
use crate::meta::MetaInfo;
use crate::ontology::{ClassKeeper, OntologicalClass};
use crate::vocabulary::bibtex;

// ------------- Resource -------------
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    uri: Option<Iri>,
    meta: MetaInfo,
    classes: HashSet<Arc<OntologicalClass>>,
    enabled: bool,
}

impl Resource {
    pub fn new(uri: Option<Iri>) -> Self {
        Self {
            uri,
            meta: MetaInfo::default(),
            classes: HashSet::new(),
            enabled: true,
        }
    }

    pub fn uri(&self) -> Option<&Iri> {
        self.uri.as_ref()
    }
    pub fn set_uri(&mut self, uri: Option<Iri>) {
        self.uri = uri;
    }
    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }
    pub fn set_meta(&mut self, meta: MetaInfo) {
        self.meta = meta;
    }
    pub fn with_meta(mut self, meta: MetaInfo) -> Self {
        self.meta = meta;
        self
    }
    pub fn classes(&self) -> &HashSet<Arc<OntologicalClass>> {
        &self.classes
    }
    pub fn add_class(&mut self, class: Arc<OntologicalClass>) -> bool {
        self.classes.insert(class)
    }
    pub fn set_classes(&mut self, classes: HashSet<Arc<OntologicalClass>>) {
        self.classes = classes;
    }
    pub fn enabled(&self) -> bool {
        self.enabled
    }
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

fn classified(uri: Option<Iri>, keeper: &ClassKeeper, kind: &str) -> Resource {
    let mut resource = Resource::new(uri);
    if let Some(class) = keeper.by_name(kind) {
        resource.add_class(class);
    }
    resource
}

// ------------- Task -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TaskStatus {
    Queued,
    Running,
    Completed,
    Cancelled,
    Error,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Queued => "QUEUED",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Cancelled => "CANCELLED",
            TaskStatus::Error => "ERROR",
        }
    }

    pub fn from_wire(s: &str) -> Option<TaskStatus> {
        match s.to_ascii_uppercase().as_str() {
            "QUEUED" => Some(TaskStatus::Queued),
            "RUNNING" => Some(TaskStatus::Running),
            "COMPLETED" => Some(TaskStatus::Completed),
            "CANCELLED" => Some(TaskStatus::Cancelled),
            "ERROR" => Some(TaskStatus::Error),
            _ => None,
        }
    }

    /// A terminal status will never change on subsequent fetches.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Cancelled | TaskStatus::Error
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An asynchronous job on a remote service.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    resource: Resource,
    status: Option<TaskStatus>,
    percentage_completed: Option<f32>,
    result_uri: Option<Iri>,
    error_report: Option<Box<ErrorReport>>,
}

impl Task {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "Task"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            status: None,
            percentage_completed: None,
            result_uri: None,
            error_report: None,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }
    pub fn set_status(&mut self, status: Option<TaskStatus>) {
        self.status = status;
    }
    pub fn percentage_completed(&self) -> Option<f32> {
        self.percentage_completed
    }
    pub fn set_percentage_completed(&mut self, percentage: Option<f32>) {
        self.percentage_completed = percentage;
    }
    pub fn result_uri(&self) -> Option<&Iri> {
        self.result_uri.as_ref()
    }
    pub fn set_result_uri(&mut self, uri: Option<Iri>) {
        self.result_uri = uri;
    }
    pub fn error_report(&self) -> Option<&ErrorReport> {
        self.error_report.as_deref()
    }
    pub fn set_error_report(&mut self, report: Option<ErrorReport>) {
        self.error_report = report.map(Box::new);
    }
}

// ------------- ErrorReport -------------
/// A remote failure description; causes chain like the failures they
/// describe.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorReport {
    resource: Resource,
    actor: Option<String>,
    message: Option<String>,
    details: Option<String>,
    http_status: Option<u16>,
    error_cause: Option<Box<ErrorReport>>,
}

impl ErrorReport {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "ErrorReport"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            actor: None,
            message: None,
            details: None,
            http_status: None,
            error_cause: None,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
    pub fn set_actor(&mut self, actor: Option<String>) {
        self.actor = actor;
    }
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
    pub fn set_details(&mut self, details: Option<String>) {
        self.details = details;
    }
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }
    pub fn set_http_status(&mut self, status: Option<u16>) {
        self.http_status = status;
    }
    pub fn error_cause(&self) -> Option<&ErrorReport> {
        self.error_cause.as_deref()
    }
    pub fn set_error_cause(&mut self, cause: Option<ErrorReport>) {
        self.error_cause = cause.map(Box::new);
    }
}

// ------------- Feature -------------
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    resource: Resource,
    units: Option<String>,
}

impl Feature {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "Feature"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            units: None,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }
    pub fn set_units(&mut self, units: Option<String>) {
        self.units = units;
    }
}

// ------------- Parameter -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ParameterScope {
    #[default]
    Optional,
    Mandatory,
}

impl ParameterScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterScope::Optional => "OPTIONAL",
            ParameterScope::Mandatory => "MANDATORY",
        }
    }
    pub fn from_wire(s: &str) -> Option<ParameterScope> {
        match s.to_ascii_uppercase().as_str() {
            "OPTIONAL" => Some(ParameterScope::Optional),
            "MANDATORY" => Some(ParameterScope::Mandatory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    resource: Resource,
    scope: ParameterScope,
    value: Option<Literal>,
}

impl Parameter {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "Parameter"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            scope: ParameterScope::default(),
            value: None,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn scope(&self) -> ParameterScope {
        self.scope
    }
    pub fn set_scope(&mut self, scope: ParameterScope) {
        self.scope = scope;
    }
    pub fn value(&self) -> Option<&Literal> {
        self.value.as_ref()
    }
    pub fn set_value(&mut self, value: Option<Literal>) {
        self.value = value;
    }
}

// ------------- Algorithm -------------
#[derive(Clone, Debug, PartialEq)]
pub struct Algorithm {
    resource: Resource,
    parameters: Vec<Parameter>,
}

impl Algorithm {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "Algorithm"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            parameters: Vec::new(),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }
}

// ------------- Dataset -------------
/// One feature measured for one entry.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureValue {
    feature: Feature,
    value: Literal,
}

impl FeatureValue {
    pub fn new(feature: Feature, value: Literal) -> Self {
        Self { feature, value }
    }
    pub fn feature(&self) -> &Feature {
        &self.feature
    }
    pub fn value(&self) -> &Literal {
        &self.value
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct DataEntry {
    conformer: Option<Iri>,
    values: Vec<FeatureValue>,
}

impl DataEntry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn conformer(&self) -> Option<&Iri> {
        self.conformer.as_ref()
    }
    pub fn set_conformer(&mut self, conformer: Option<Iri>) {
        self.conformer = conformer;
    }
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }
    pub fn add_value(&mut self, value: FeatureValue) {
        self.values.push(value);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    resource: Resource,
    entries: Vec<DataEntry>,
}

impl Dataset {
    pub fn new(uri: Option<Iri>, keeper: &ClassKeeper) -> Self {
        Self::from_resource(classified(uri, keeper, "Dataset"))
    }
    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            entries: Vec::new(),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn entries(&self) -> &[DataEntry] {
        &self.entries
    }
    pub fn add_entry(&mut self, entry: DataEntry) {
        self.entries.push(entry);
    }
}

// ------------- Bibliography -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntryKind {
    Article,
    Book,
    Conference,
    Mastersthesis,
    Phdthesis,
    Techreport,
    Misc,
}

impl EntryKind {
    pub fn uri(&self) -> &'static str {
        match self {
            EntryKind::Article => bibtex::ARTICLE,
            EntryKind::Book => bibtex::BOOK,
            EntryKind::Conference => bibtex::CONFERENCE,
            EntryKind::Mastersthesis => bibtex::MASTERSTHESIS,
            EntryKind::Phdthesis => bibtex::PHDTHESIS,
            EntryKind::Techreport => bibtex::TECHREPORT,
            EntryKind::Misc => bibtex::MISC,
        }
    }

    pub fn from_uri(uri: &str) -> Option<EntryKind> {
        match uri {
            bibtex::ARTICLE => Some(EntryKind::Article),
            bibtex::BOOK => Some(EntryKind::Book),
            bibtex::CONFERENCE => Some(EntryKind::Conference),
            bibtex::MASTERSTHESIS => Some(EntryKind::Mastersthesis),
            bibtex::PHDTHESIS => Some(EntryKind::Phdthesis),
            bibtex::TECHREPORT => Some(EntryKind::Techreport),
            bibtex::MISC => Some(EntryKind::Misc),
            _ => None,
        }
    }
}

/// A bibliographic record with explicit, enumerated fields.
#[derive(Clone, Debug, PartialEq)]
pub struct BibEntry {
    resource: Resource,
    kind: EntryKind,
    author: Option<String>,
    title: Option<String>,
    journal: Option<String>,
    book_title: Option<String>,
    year: Option<u16>,
    pages: Option<String>,
    abstract_text: Option<String>,
    url: Option<Iri>,
}

impl BibEntry {
    pub fn new(uri: Option<Iri>, kind: EntryKind) -> Self {
        Self::from_resource(Resource::new(uri), kind)
    }
    pub fn from_resource(resource: Resource, kind: EntryKind) -> Self {
        Self {
            resource,
            kind,
            author: None,
            title: None,
            journal: None,
            book_title: None,
            year: None,
            pages: None,
            abstract_text: None,
            url: None,
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
    pub fn kind(&self) -> EntryKind {
        self.kind
    }
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
    pub fn set_author(&mut self, author: Option<String>) {
        self.author = author;
    }
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }
    pub fn journal(&self) -> Option<&str> {
        self.journal.as_deref()
    }
    pub fn set_journal(&mut self, journal: Option<String>) {
        self.journal = journal;
    }
    pub fn book_title(&self) -> Option<&str> {
        self.book_title.as_deref()
    }
    pub fn set_book_title(&mut self, book_title: Option<String>) {
        self.book_title = book_title;
    }
    pub fn year(&self) -> Option<u16> {
        self.year
    }
    pub fn set_year(&mut self, year: Option<u16>) {
        self.year = year;
    }
    pub fn pages(&self) -> Option<&str> {
        self.pages.as_deref()
    }
    pub fn set_pages(&mut self, pages: Option<String>) {
        self.pages = pages;
    }
    pub fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref()
    }
    pub fn set_abstract_text(&mut self, text: Option<String>) {
        self.abstract_text = text;
    }
    pub fn url(&self) -> Option<&Iri> {
        self.url.as_ref()
    }
    pub fn set_url(&mut self, url: Option<Iri>) {
        self.url = url;
    }
}
