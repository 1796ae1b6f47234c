//! Ontological classes and properties, plus the keepers that own their
//! canonical instances.
//!
//! Identity for both classes and properties is the URI alone (namespace
//! plus local name, derived at construction and never settable), so they
//! can live in hash-based visited sets even while their hierarchy sets
//! are still being assembled. Super-class and disjoint-with pointers are
//! stored as URIs and resolved through a [`ClassKeeper`], which makes
//! cyclic hierarchies directly representable.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bimap::BiMap;
use tracing::warn;

use crate::graph::{Iri, Primitive};
use crate::meta::MetaInfo;
use crate::vocabulary::ot;

// ------------- OntologicalClass -------------
#[derive(Clone, Debug)]
pub struct OntologicalClass {
    namespace: String,
    name: String,
    supers: HashSet<Iri>,
    disjoint: HashSet<Iri>,
    meta: MetaInfo,
}

impl OntologicalClass {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        if name.is_empty() {
            warn!(namespace = %namespace, "anonymous class constructed");
        }
        Self {
            namespace,
            name,
            supers: HashSet::new(),
            disjoint: HashSet::new(),
            meta: MetaInfo::default(),
        }
    }

    pub fn with_super(mut self, parent: Iri) -> Self {
        self.supers.insert(parent);
        self
    }
    pub fn with_disjoint(mut self, other: Iri) -> Self {
        self.disjoint.insert(other);
        self
    }
    pub fn with_meta(mut self, meta: MetaInfo) -> Self {
        self.meta = meta;
        self
    }
    pub fn add_super(&mut self, parent: Iri) -> bool {
        self.supers.insert(parent)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The derived identity: namespace followed by local name.
    pub fn uri(&self) -> Iri {
        Iri::known(&format!("{}{}", self.namespace, self.name))
    }
    pub fn supers(&self) -> &HashSet<Iri> {
        &self.supers
    }
    pub fn disjoint(&self) -> &HashSet<Iri> {
        &self.disjoint
    }
    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    /// True iff `other` is reachable from here via the super-class
    /// relation. Cycle-safe.
    pub fn is_descendant_of(&self, other: &OntologicalClass, keeper: &ClassKeeper) -> bool {
        let target = other.uri();
        let mut visited: HashSet<Iri> = HashSet::new();
        let mut work: Vec<Iri> = self.supers.iter().cloned().collect();
        while let Some(uri) = work.pop() {
            if !visited.insert(uri.clone()) {
                continue;
            }
            if uri == target {
                return true;
            }
            if let Some(class) = keeper.get(&uri) {
                work.extend(class.supers().iter().cloned());
            }
        }
        false
    }
}

// identity is the URI only, never the hierarchy
impl PartialEq for OntologicalClass {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}
impl Eq for OntologicalClass {}
impl Hash for OntologicalClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
    }
}
impl fmt::Display for OntologicalClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.name)
    }
}

// ------------- OntologicalProperty -------------
/// What a property may point at: primitive literals or resources of the
/// given classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyRange {
    Data(HashSet<Primitive>),
    Object(HashSet<Iri>),
}

#[derive(Clone, Debug)]
pub struct OntologicalProperty {
    namespace: String,
    name: String,
    domain: HashSet<Iri>,
    supers: HashSet<Iri>,
    range: PropertyRange,
    meta: MetaInfo,
}

impl OntologicalProperty {
    pub fn datatype(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            domain: HashSet::new(),
            supers: HashSet::new(),
            range: PropertyRange::Data(HashSet::new()),
            meta: MetaInfo::default(),
        }
    }

    pub fn object(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            domain: HashSet::new(),
            supers: HashSet::new(),
            range: PropertyRange::Object(HashSet::new()),
            meta: MetaInfo::default(),
        }
    }

    pub fn with_domain(mut self, class: Iri) -> Self {
        self.domain.insert(class);
        self
    }
    pub fn with_super(mut self, parent: Iri) -> Self {
        self.supers.insert(parent);
        self
    }
    pub fn with_meta(mut self, meta: MetaInfo) -> Self {
        self.meta = meta;
        self
    }
    pub fn with_range_primitive(mut self, primitive: Primitive) -> Self {
        if let PropertyRange::Data(set) = &mut self.range {
            set.insert(primitive);
        }
        self
    }
    pub fn with_range_class(mut self, class: Iri) -> Self {
        if let PropertyRange::Object(set) = &mut self.range {
            set.insert(class);
        }
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn uri(&self) -> Iri {
        Iri::known(&format!("{}{}", self.namespace, self.name))
    }
    pub fn domain(&self) -> &HashSet<Iri> {
        &self.domain
    }
    pub fn supers(&self) -> &HashSet<Iri> {
        &self.supers
    }
    pub fn range(&self) -> &PropertyRange {
        &self.range
    }
    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }
}

impl PartialEq for OntologicalProperty {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}
impl Eq for OntologicalProperty {}
impl Hash for OntologicalProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
    }
}

// ------------- ClassKeeper -------------
/// Owns the canonical classes of one namespace, indexed both by URI and
/// by local name. The name index is what the type-closure resolver and
/// the per-kind materializers look things up in.
#[derive(Debug, Default)]
pub struct ClassKeeper {
    namespace: String,
    kept: HashMap<Iri, Arc<OntologicalClass>>,
    names: BiMap<String, Iri>,
}

impl ClassKeeper {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            kept: HashMap::new(),
            names: BiMap::new(),
        }
    }

    /// The seeded toxicology catalog.
    pub fn standard() -> Self {
        let mut keeper = Self::new(ot::NS);
        keeper.keep(OntologicalClass::new(ot::NS, "Compound"));
        keeper.keep(OntologicalClass::new(ot::NS, "Conformer").with_super(Iri::known(ot::COMPOUND)));
        keeper.keep(
            OntologicalClass::new(ot::NS, "Feature")
                .with_meta(MetaInfo::default().add_comment("A measurable property of a compound")),
        );
        keeper.keep(
            OntologicalClass::new(ot::NS, "NumericFeature").with_super(Iri::known(ot::FEATURE)),
        );
        keeper.keep(
            OntologicalClass::new(ot::NS, "NominalFeature").with_super(Iri::known(ot::FEATURE)),
        );
        keeper.keep(
            OntologicalClass::new(ot::NS, "StringFeature").with_super(Iri::known(ot::FEATURE)),
        );
        keeper.keep(OntologicalClass::new(ot::NS, "FeatureValue"));
        keeper.keep(OntologicalClass::new(ot::NS, "Dataset"));
        keeper.keep(OntologicalClass::new(ot::NS, "DataEntry"));
        keeper.keep(OntologicalClass::new(ot::NS, "Algorithm"));
        keeper.keep(
            OntologicalClass::new(ot::NS, "Task").with_meta(
                MetaInfo::default().add_comment("An asynchronous job running on a remote service"),
            ),
        );
        keeper.keep(OntologicalClass::new(ot::NS, "Parameter"));
        keeper.keep(OntologicalClass::new(ot::NS, "ErrorReport"));
        keeper
    }

    pub fn keep(&mut self, class: OntologicalClass) -> (Arc<OntologicalClass>, bool) {
        let uri = class.uri();
        let mut previously_kept = true;
        match self.kept.entry(uri.clone()) {
            Entry::Vacant(e) => {
                self.names.insert(class.name().to_owned(), uri.clone());
                e.insert(Arc::new(class));
                previously_kept = false;
            }
            Entry::Occupied(_) => (),
        }
        (Arc::clone(self.kept.get(&uri).unwrap()), previously_kept)
    }

    pub fn get(&self, uri: &Iri) -> Option<Arc<OntologicalClass>> {
        self.kept.get(uri).map(Arc::clone)
    }

    pub fn by_name(&self, name: &str) -> Option<Arc<OntologicalClass>> {
        self.names
            .get_by_left(name)
            .and_then(|uri| self.kept.get(uri))
            .map(Arc::clone)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<OntologicalClass>> {
        self.kept.values()
    }
}

// ------------- PropertyKeeper -------------
#[derive(Debug, Default)]
pub struct PropertyKeeper {
    kept: HashMap<Iri, Arc<OntologicalProperty>>,
}

impl PropertyKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seeded toxicology predicates with their domain/range
    /// assertions.
    pub fn standard() -> Self {
        let mut keeper = Self::new();
        keeper.keep(
            OntologicalProperty::object(ot::NS, "hasSource")
                .with_domain(Iri::known(ot::FEATURE))
                .with_range_class(Iri::known(ot::DATASET))
                .with_range_class(Iri::known(ot::ALGORITHM)),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "hasStatus")
                .with_domain(Iri::known(ot::TASK))
                .with_range_primitive(Primitive::String),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "resultURI")
                .with_domain(Iri::known(ot::TASK))
                .with_range_primitive(Primitive::AnyUri),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "percentageCompleted")
                .with_domain(Iri::known(ot::TASK))
                .with_range_primitive(Primitive::Float),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "errorReport")
                .with_domain(Iri::known(ot::TASK))
                .with_range_class(Iri::known(ot::ERROR_REPORT)),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "errorCause")
                .with_domain(Iri::known(ot::ERROR_REPORT))
                .with_range_class(Iri::known(ot::ERROR_REPORT)),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "actor")
                .with_domain(Iri::known(ot::ERROR_REPORT))
                .with_range_primitive(Primitive::String),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "message")
                .with_domain(Iri::known(ot::ERROR_REPORT))
                .with_range_primitive(Primitive::String),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "details")
                .with_domain(Iri::known(ot::ERROR_REPORT))
                .with_range_primitive(Primitive::String),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "httpStatus")
                .with_domain(Iri::known(ot::ERROR_REPORT))
                .with_range_primitive(Primitive::Integer),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "parameters")
                .with_domain(Iri::known(ot::ALGORITHM))
                .with_range_class(Iri::known(ot::PARAMETER)),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "paramValue")
                .with_domain(Iri::known(ot::PARAMETER))
                .with_range_primitive(Primitive::String)
                .with_range_primitive(Primitive::Double)
                .with_range_primitive(Primitive::Integer),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "paramScope")
                .with_domain(Iri::known(ot::PARAMETER))
                .with_range_primitive(Primitive::String),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "dataEntry")
                .with_domain(Iri::known(ot::DATASET))
                .with_range_class(Iri::known(ot::DATA_ENTRY)),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "compound")
                .with_domain(Iri::known(ot::DATA_ENTRY))
                .with_range_class(Iri::known(ot::COMPOUND)),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "values")
                .with_domain(Iri::known(ot::DATA_ENTRY))
                .with_range_class(Iri::known(ot::FEATURE_VALUE)),
        );
        keeper.keep(
            OntologicalProperty::object(ot::NS, "feature")
                .with_domain(Iri::known(ot::FEATURE_VALUE))
                .with_range_class(Iri::known(ot::FEATURE)),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "value")
                .with_domain(Iri::known(ot::FEATURE_VALUE))
                .with_range_primitive(Primitive::String)
                .with_range_primitive(Primitive::Double),
        );
        keeper.keep(
            OntologicalProperty::datatype(ot::NS, "units")
                .with_domain(Iri::known(ot::FEATURE))
                .with_range_primitive(Primitive::String),
        );
        keeper
    }

    pub fn keep(&mut self, property: OntologicalProperty) -> (Arc<OntologicalProperty>, bool) {
        let uri = property.uri();
        let mut previously_kept = true;
        match self.kept.entry(uri.clone()) {
            Entry::Vacant(e) => {
                e.insert(Arc::new(property));
                previously_kept = false;
            }
            Entry::Occupied(_) => (),
        }
        (Arc::clone(self.kept.get(&uri).unwrap()), previously_kept)
    }

    pub fn get(&self, uri: &str) -> Option<Arc<OntologicalProperty>> {
        self.kept.get(&Iri::known(uri)).map(Arc::clone)
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
