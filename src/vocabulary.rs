//! Well-known URIs of the wire vocabulary.
//!
//! These must be reproduced byte for byte — remote services match on the
//! full URI, so even a harmless-looking rewrite breaks interoperability.

// ------------- RDF / RDFS / OWL -------------
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

pub mod owl {
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
}

// ------------- Dublin Core -------------
pub mod dc {
    pub const NS: &str = "http://purl.org/dc/elements/1.1/";
    pub const IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
    pub const TITLE: &str = "http://purl.org/dc/elements/1.1/title";
    pub const DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
    pub const SUBJECT: &str = "http://purl.org/dc/elements/1.1/subject";
    pub const PUBLISHER: &str = "http://purl.org/dc/elements/1.1/publisher";
    pub const CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";
    pub const CONTRIBUTOR: &str = "http://purl.org/dc/elements/1.1/contributor";
    pub const RIGHTS: &str = "http://purl.org/dc/elements/1.1/rights";
    pub const DATE: &str = "http://purl.org/dc/elements/1.1/date";
}

pub mod dcterms {
    pub const NS: &str = "http://purl.org/dc/terms/";
    pub const AUDIENCE: &str = "http://purl.org/dc/terms/audience";
}

// ------------- Toxicology domain -------------
pub mod ot {
    pub const NS: &str = "http://www.opentox.org/api/1.1#";

    // classes
    pub const COMPOUND: &str = "http://www.opentox.org/api/1.1#Compound";
    pub const CONFORMER: &str = "http://www.opentox.org/api/1.1#Conformer";
    pub const FEATURE: &str = "http://www.opentox.org/api/1.1#Feature";
    pub const NUMERIC_FEATURE: &str = "http://www.opentox.org/api/1.1#NumericFeature";
    pub const NOMINAL_FEATURE: &str = "http://www.opentox.org/api/1.1#NominalFeature";
    pub const STRING_FEATURE: &str = "http://www.opentox.org/api/1.1#StringFeature";
    pub const FEATURE_VALUE: &str = "http://www.opentox.org/api/1.1#FeatureValue";
    pub const DATASET: &str = "http://www.opentox.org/api/1.1#Dataset";
    pub const DATA_ENTRY: &str = "http://www.opentox.org/api/1.1#DataEntry";
    pub const ALGORITHM: &str = "http://www.opentox.org/api/1.1#Algorithm";
    pub const TASK: &str = "http://www.opentox.org/api/1.1#Task";
    pub const PARAMETER: &str = "http://www.opentox.org/api/1.1#Parameter";
    pub const ERROR_REPORT: &str = "http://www.opentox.org/api/1.1#ErrorReport";

    // properties
    pub const HAS_SOURCE: &str = "http://www.opentox.org/api/1.1#hasSource";
    pub const HAS_STATUS: &str = "http://www.opentox.org/api/1.1#hasStatus";
    pub const RESULT_URI: &str = "http://www.opentox.org/api/1.1#resultURI";
    pub const PERCENTAGE_COMPLETED: &str = "http://www.opentox.org/api/1.1#percentageCompleted";
    pub const ERROR_REPORT_PROP: &str = "http://www.opentox.org/api/1.1#errorReport";
    pub const ERROR_CAUSE: &str = "http://www.opentox.org/api/1.1#errorCause";
    pub const ACTOR: &str = "http://www.opentox.org/api/1.1#actor";
    pub const MESSAGE: &str = "http://www.opentox.org/api/1.1#message";
    pub const DETAILS: &str = "http://www.opentox.org/api/1.1#details";
    pub const HTTP_STATUS: &str = "http://www.opentox.org/api/1.1#httpStatus";
    pub const PARAMETERS: &str = "http://www.opentox.org/api/1.1#parameters";
    pub const PARAM_VALUE: &str = "http://www.opentox.org/api/1.1#paramValue";
    pub const PARAM_SCOPE: &str = "http://www.opentox.org/api/1.1#paramScope";
    pub const DATA_ENTRY_PROP: &str = "http://www.opentox.org/api/1.1#dataEntry";
    pub const COMPOUND_PROP: &str = "http://www.opentox.org/api/1.1#compound";
    pub const VALUES: &str = "http://www.opentox.org/api/1.1#values";
    pub const FEATURE_PROP: &str = "http://www.opentox.org/api/1.1#feature";
    pub const VALUE: &str = "http://www.opentox.org/api/1.1#value";
    pub const UNITS: &str = "http://www.opentox.org/api/1.1#units";
}

// ------------- Bibliography -------------
pub mod bibtex {
    pub const NS: &str = "http://purl.org/net/nknouf/ns/bibtex#";

    pub const ENTRY: &str = "http://purl.org/net/nknouf/ns/bibtex#Entry";
    pub const ARTICLE: &str = "http://purl.org/net/nknouf/ns/bibtex#Article";
    pub const BOOK: &str = "http://purl.org/net/nknouf/ns/bibtex#Book";
    pub const CONFERENCE: &str = "http://purl.org/net/nknouf/ns/bibtex#Conference";
    pub const MASTERSTHESIS: &str = "http://purl.org/net/nknouf/ns/bibtex#Mastersthesis";
    pub const PHDTHESIS: &str = "http://purl.org/net/nknouf/ns/bibtex#Phdthesis";
    pub const TECHREPORT: &str = "http://purl.org/net/nknouf/ns/bibtex#Techreport";
    pub const MISC: &str = "http://purl.org/net/nknouf/ns/bibtex#Misc";

    pub const HAS_AUTHOR: &str = "http://purl.org/net/nknouf/ns/bibtex#hasAuthor";
    pub const HAS_TITLE: &str = "http://purl.org/net/nknouf/ns/bibtex#hasTitle";
    pub const HAS_JOURNAL: &str = "http://purl.org/net/nknouf/ns/bibtex#hasJournal";
    pub const HAS_BOOKTITLE: &str = "http://purl.org/net/nknouf/ns/bibtex#hasBooktitle";
    pub const HAS_YEAR: &str = "http://purl.org/net/nknouf/ns/bibtex#hasYear";
    pub const HAS_PAGES: &str = "http://purl.org/net/nknouf/ns/bibtex#hasPages";
    pub const HAS_ABSTRACT: &str = "http://purl.org/net/nknouf/ns/bibtex#hasAbstract";
    pub const HAS_URL: &str = "http://purl.org/net/nknouf/ns/bibtex#hasURL";
}

// ------------- XSD datatypes -------------
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}
