//! Writes typed resources into a graph.
//!
//! Class deduplication runs through a vault (visited set) that is created
//! per materialization call and threaded through every nested write as a
//! parameter. The materializer itself keeps no state between calls, so
//! independent callers can materialize into independent graphs without
//! one call suppressing class emission in another.

use std::collections::HashSet;

use crate::graph::{Graph, GraphHasher, Iri, Literal, NodeId, Term};
use crate::meta::{MetaInfo, ResourceRef};
use crate::ontology::{
    ClassKeeper, OntologicalClass, OntologicalProperty, PropertyKeeper, PropertyRange,
};
use crate::resource::{
    Algorithm, BibEntry, Dataset, ErrorReport, Feature, Parameter, Resource, Task,
};
use crate::vocabulary::{bibtex, dc, dcterms, ot, owl, rdf, rdfs};

/// The per-call visited set keyed by class URI.
pub type Vault = HashSet<Iri, GraphHasher>;

pub struct Materializer<'a> {
    graph: &'a mut Graph,
    classes: &'a ClassKeeper,
    properties: &'a PropertyKeeper,
}

impl<'a> Materializer<'a> {
    pub fn new(
        graph: &'a mut Graph,
        classes: &'a ClassKeeper,
        properties: &'a PropertyKeeper,
    ) -> Self {
        Self {
            graph,
            classes,
            properties,
        }
    }

    /// Writes the generic part of a resource: its node, its class
    /// memberships (with class definitions), and its metadata. Returns
    /// the node standing for the resource.
    pub fn attach(&mut self, resource: &Resource) -> NodeId {
        let mut vault = Vault::default();
        self.attach_with(resource, &mut vault)
    }

    pub fn attach_with(&mut self, resource: &Resource, vault: &mut Vault) -> NodeId {
        let node = match resource.uri() {
            Some(uri) => NodeId::Named(uri.clone()),
            None => self.graph.fresh_blank(),
        };
        for class in resource.classes() {
            self.graph.insert(
                node.clone(),
                Iri::known(rdf::TYPE),
                Term::named(class.uri()),
            );
            self.write_class(class, vault);
        }
        self.write_meta(&node, resource.meta(), vault);
        node
    }

    /// Emits a class node at most once per call (checked against the
    /// vault), then recurses into unvisited super-classes. The
    /// subClassOf and disjointWith edges are written regardless of the
    /// vault — the graph dedups edges by their endpoints — so cyclic
    /// hierarchies terminate with every edge present.
    pub fn write_class(&mut self, class: &OntologicalClass, vault: &mut Vault) {
        let uri = class.uri();
        if !vault.insert(uri.clone()) {
            return;
        }
        let node = NodeId::Named(uri);
        self.graph.insert(
            node.clone(),
            Iri::known(rdf::TYPE),
            Term::named(Iri::known(owl::CLASS)),
        );
        self.write_meta(&node, class.meta(), vault);
        for parent in class.supers() {
            self.graph.insert(
                node.clone(),
                Iri::known(rdfs::SUB_CLASS_OF),
                Term::named(parent.clone()),
            );
        }
        for other in class.disjoint() {
            self.graph.insert(
                node.clone(),
                Iri::known(owl::DISJOINT_WITH),
                Term::named(other.clone()),
            );
        }
        for parent in class.supers() {
            if let Some(parent) = self.classes.get(parent) {
                self.write_class(&parent, vault);
            }
        }
    }

    /// Declares a property node with its domain and range assertions.
    /// Idempotent through the graph itself: a URI that already stands
    /// as a subject is not declared again.
    pub fn write_property(&mut self, property: &OntologicalProperty) {
        let mut vault = Vault::default();
        self.write_property_with(property, &mut vault);
    }

    pub fn write_property_with(&mut self, property: &OntologicalProperty, vault: &mut Vault) {
        let node = NodeId::Named(property.uri());
        if self.graph.has_subject(&node) {
            return;
        }
        let kind = match property.range() {
            PropertyRange::Data(_) => owl::DATATYPE_PROPERTY,
            PropertyRange::Object(_) => owl::OBJECT_PROPERTY,
        };
        self.graph.insert(
            node.clone(),
            Iri::known(rdf::TYPE),
            Term::named(Iri::known(kind)),
        );
        for class in property.domain() {
            self.graph.insert(
                node.clone(),
                Iri::known(rdfs::DOMAIN),
                Term::named(class.clone()),
            );
        }
        match property.range() {
            PropertyRange::Data(primitives) => {
                for primitive in primitives {
                    self.graph.insert(
                        node.clone(),
                        Iri::known(rdfs::RANGE),
                        Term::named(Iri::known(primitive.uri())),
                    );
                }
            }
            PropertyRange::Object(classes) => {
                for class in classes {
                    self.graph.insert(
                        node.clone(),
                        Iri::known(rdfs::RANGE),
                        Term::named(class.clone()),
                    );
                }
            }
        }
        for parent in property.supers() {
            self.graph.insert(
                node.clone(),
                Iri::known(rdfs::SUB_PROPERTY_OF),
                Term::named(parent.clone()),
            );
        }
        self.write_meta(&node, property.meta(), vault);
    }

    // declares a domain predicate before first use; built-in vocabulary
    // (DC, RDFS, OWL) is never declared
    fn declare(&mut self, uri: &str, vault: &mut Vault) {
        if let Some(property) = self.properties.get(uri) {
            self.write_property_with(&property, vault);
        }
    }

    fn write_meta(&mut self, node: &NodeId, meta: &MetaInfo, vault: &mut Vault) {
        let fields = [
            (dc::IDENTIFIER, meta.identifiers()),
            (dc::TITLE, meta.titles()),
            (rdfs::COMMENT, meta.comments()),
            (dc::DESCRIPTION, meta.descriptions()),
            (dc::SUBJECT, meta.subjects()),
            (dc::PUBLISHER, meta.publishers()),
            (dc::CREATOR, meta.creators()),
            (dc::CONTRIBUTOR, meta.contributors()),
            (dcterms::AUDIENCE, meta.audiences()),
            (dc::RIGHTS, meta.rights()),
        ];
        for (predicate, values) in fields {
            // absent fields produce no edges at all
            let Some(values) = values else { continue };
            for value in values {
                self.graph.insert(
                    node.clone(),
                    Iri::known(predicate),
                    Term::Literal(Literal::string(value)),
                );
            }
        }
        if let Some(date) = meta.date() {
            self.graph.insert(
                node.clone(),
                Iri::known(dc::DATE),
                Term::Literal(Literal::date_time(date)),
            );
        }
        if let Some(refs) = meta.same_as() {
            for r in refs {
                self.write_ref(node, owl::SAME_AS, r, vault);
            }
        }
        if let Some(refs) = meta.see_also() {
            for r in refs {
                self.write_ref(node, rdfs::SEE_ALSO, r, vault);
            }
        }
        if let Some(refs) = meta.has_sources() {
            if !refs.is_empty() {
                self.declare(ot::HAS_SOURCE, vault);
            }
            for r in refs {
                self.write_ref(node, ot::HAS_SOURCE, r, vault);
            }
        }
    }

    // materializes the referenced resource's own node and points at it
    fn write_ref(&mut self, node: &NodeId, predicate: &str, r: &ResourceRef, vault: &mut Vault) {
        let target = NodeId::Named(r.uri().clone());
        self.graph.insert(
            node.clone(),
            Iri::known(predicate),
            Term::Node(target.clone()),
        );
        if let Some(class) = r.class() {
            self.graph
                .insert(target, Iri::known(rdf::TYPE), Term::named(class.clone()));
            if let Some(kept) = self.classes.get(class) {
                self.write_class(&kept, vault);
            }
        }
    }

    // asserts the kind class for a node even when the caller left it
    // out of the membership set
    fn classify_as(&mut self, node: &NodeId, kind: &str, vault: &mut Vault) {
        if let Some(class) = self.classes.by_name(kind) {
            self.graph.insert(
                node.clone(),
                Iri::known(rdf::TYPE),
                Term::named(class.uri()),
            );
            self.write_class(&class, vault);
        }
    }

    // ------------- per-kind attachment -------------
    pub fn attach_task(&mut self, task: &Task) -> NodeId {
        let mut vault = Vault::default();
        self.attach_task_with(task, &mut vault)
    }

    pub fn attach_task_with(&mut self, task: &Task, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(task.resource(), vault);
        self.classify_as(&node, "Task", vault);
        if let Some(status) = task.status() {
            self.declare(ot::HAS_STATUS, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::HAS_STATUS),
                Term::Literal(Literal::string(status.as_str())),
            );
        }
        if let Some(percentage) = task.percentage_completed() {
            self.declare(ot::PERCENTAGE_COMPLETED, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::PERCENTAGE_COMPLETED),
                Term::Literal(Literal::float(percentage)),
            );
        }
        if let Some(result) = task.result_uri() {
            self.declare(ot::RESULT_URI, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::RESULT_URI),
                Term::Literal(Literal::any_uri(result)),
            );
        }
        if let Some(report) = task.error_report() {
            let child = self.attach_error_report_with(report, vault);
            self.declare(ot::ERROR_REPORT_PROP, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::ERROR_REPORT_PROP),
                Term::Node(child),
            );
        }
        node
    }

    pub fn attach_error_report(&mut self, report: &ErrorReport) -> NodeId {
        let mut vault = Vault::default();
        self.attach_error_report_with(report, &mut vault)
    }

    pub fn attach_error_report_with(&mut self, report: &ErrorReport, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(report.resource(), vault);
        self.classify_as(&node, "ErrorReport", vault);
        let scalars = [
            (ot::ACTOR, report.actor()),
            (ot::MESSAGE, report.message()),
            (ot::DETAILS, report.details()),
        ];
        for (predicate, value) in scalars {
            let Some(value) = value else { continue };
            self.declare(predicate, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(predicate),
                Term::Literal(Literal::string(value)),
            );
        }
        if let Some(status) = report.http_status() {
            self.declare(ot::HTTP_STATUS, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::HTTP_STATUS),
                Term::Literal(Literal::integer(status as i64)),
            );
        }
        if let Some(cause) = report.error_cause() {
            let child = self.attach_error_report_with(cause, vault);
            self.declare(ot::ERROR_CAUSE, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::ERROR_CAUSE),
                Term::Node(child),
            );
        }
        node
    }

    pub fn attach_feature(&mut self, feature: &Feature) -> NodeId {
        let mut vault = Vault::default();
        self.attach_feature_with(feature, &mut vault)
    }

    pub fn attach_feature_with(&mut self, feature: &Feature, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(feature.resource(), vault);
        self.classify_as(&node, "Feature", vault);
        if let Some(units) = feature.units() {
            self.declare(ot::UNITS, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::UNITS),
                Term::Literal(Literal::string(units)),
            );
        }
        node
    }

    pub fn attach_parameter(&mut self, parameter: &Parameter) -> NodeId {
        let mut vault = Vault::default();
        self.attach_parameter_with(parameter, &mut vault)
    }

    pub fn attach_parameter_with(&mut self, parameter: &Parameter, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(parameter.resource(), vault);
        self.classify_as(&node, "Parameter", vault);
        self.declare(ot::PARAM_SCOPE, vault);
        self.graph.insert(
            node.clone(),
            Iri::known(ot::PARAM_SCOPE),
            Term::Literal(Literal::string(parameter.scope().as_str())),
        );
        if let Some(value) = parameter.value() {
            self.declare(ot::PARAM_VALUE, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::PARAM_VALUE),
                Term::Literal(value.clone()),
            );
        }
        node
    }

    pub fn attach_algorithm(&mut self, algorithm: &Algorithm) -> NodeId {
        let mut vault = Vault::default();
        self.attach_algorithm_with(algorithm, &mut vault)
    }

    pub fn attach_algorithm_with(&mut self, algorithm: &Algorithm, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(algorithm.resource(), vault);
        self.classify_as(&node, "Algorithm", vault);
        for parameter in algorithm.parameters() {
            let child = self.attach_parameter_with(parameter, vault);
            self.declare(ot::PARAMETERS, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::PARAMETERS),
                Term::Node(child),
            );
        }
        node
    }

    pub fn attach_dataset(&mut self, dataset: &Dataset) -> NodeId {
        let mut vault = Vault::default();
        self.attach_dataset_with(dataset, &mut vault)
    }

    pub fn attach_dataset_with(&mut self, dataset: &Dataset, vault: &mut Vault) -> NodeId {
        let node = self.attach_with(dataset.resource(), vault);
        self.classify_as(&node, "Dataset", vault);
        for entry in dataset.entries() {
            let entry_node = self.graph.fresh_blank();
            self.classify_as(&entry_node, "DataEntry", vault);
            self.declare(ot::DATA_ENTRY_PROP, vault);
            self.graph.insert(
                node.clone(),
                Iri::known(ot::DATA_ENTRY_PROP),
                Term::Node(entry_node.clone()),
            );
            if let Some(conformer) = entry.conformer() {
                self.declare(ot::COMPOUND_PROP, vault);
                self.graph.insert(
                    entry_node.clone(),
                    Iri::known(ot::COMPOUND_PROP),
                    Term::named(conformer.clone()),
                );
            }
            for value in entry.values() {
                let value_node = self.graph.fresh_blank();
                self.classify_as(&value_node, "FeatureValue", vault);
                self.declare(ot::VALUES, vault);
                self.graph.insert(
                    entry_node.clone(),
                    Iri::known(ot::VALUES),
                    Term::Node(value_node.clone()),
                );
                let feature_node = self.attach_feature_with(value.feature(), vault);
                self.declare(ot::FEATURE_PROP, vault);
                self.graph.insert(
                    value_node.clone(),
                    Iri::known(ot::FEATURE_PROP),
                    Term::Node(feature_node),
                );
                self.declare(ot::VALUE, vault);
                self.graph.insert(
                    value_node,
                    Iri::known(ot::VALUE),
                    Term::Literal(value.value().clone()),
                );
            }
        }
        node
    }

    /// Bibliographic entries use the foreign bibliography vocabulary:
    /// type edges and literal edges only, no class or property
    /// declarations for a namespace this system does not own.
    pub fn attach_bibliography(&mut self, entry: &BibEntry) -> NodeId {
        let mut vault = Vault::default();
        let node = self.attach_with(entry.resource(), &mut vault);
        self.graph.insert(
            node.clone(),
            Iri::known(rdf::TYPE),
            Term::named(Iri::known(entry.kind().uri())),
        );
        self.graph.insert(
            node.clone(),
            Iri::known(rdf::TYPE),
            Term::named(Iri::known(bibtex::ENTRY)),
        );
        let scalars = [
            (bibtex::HAS_AUTHOR, entry.author()),
            (bibtex::HAS_TITLE, entry.title()),
            (bibtex::HAS_JOURNAL, entry.journal()),
            (bibtex::HAS_BOOKTITLE, entry.book_title()),
            (bibtex::HAS_PAGES, entry.pages()),
            (bibtex::HAS_ABSTRACT, entry.abstract_text()),
        ];
        for (predicate, value) in scalars {
            let Some(value) = value else { continue };
            self.graph.insert(
                node.clone(),
                Iri::known(predicate),
                Term::Literal(Literal::string(value)),
            );
        }
        if let Some(year) = entry.year() {
            self.graph.insert(
                node.clone(),
                Iri::known(bibtex::HAS_YEAR),
                Term::Literal(Literal::integer(year as i64)),
            );
        }
        if let Some(url) = entry.url() {
            self.graph.insert(
                node.clone(),
                Iri::known(bibtex::HAS_URL),
                Term::Literal(Literal::any_uri(url)),
            );
        }
        node
    }
}
