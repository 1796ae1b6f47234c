//! The metadata bag attached to every resource.
//!
//! Equality and hashing are structural over unordered field contents:
//! two bags built from the same elements in different insertion orders
//! compare equal and hash identically. Downstream deduplication relies
//! on this, so the hash combines per-element hashes with a wrapping sum
//! instead of hashing an ordered collection.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use seahash::SeaHasher;

use crate::graph::Iri;

/// A reference to another resource appearing inside metadata
/// (same-as, see-also, has-source). Carries the locator and, when
/// known, the referenced resource's class.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResourceRef {
    uri: Iri,
    class: Option<Iri>,
}

impl ResourceRef {
    pub fn new(uri: Iri) -> Self {
        Self { uri, class: None }
    }
    pub fn classified(uri: Iri, class: Iri) -> Self {
        Self {
            uri,
            class: Some(class),
        }
    }
    pub fn uri(&self) -> &Iri {
        &self.uri
    }
    pub fn class(&self) -> Option<&Iri> {
        self.class.as_ref()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MetaInfo {
    identifiers: Option<HashSet<String>>,
    titles: Option<HashSet<String>>,
    comments: Option<HashSet<String>>,
    descriptions: Option<HashSet<String>>,
    subjects: Option<HashSet<String>>,
    publishers: Option<HashSet<String>>,
    creators: Option<HashSet<String>>,
    contributors: Option<HashSet<String>>,
    audiences: Option<HashSet<String>>,
    rights: Option<HashSet<String>>,
    date: Option<NaiveDateTime>,
    same_as: Option<HashSet<ResourceRef>>,
    see_also: Option<HashSet<ResourceRef>>,
    has_sources: Option<HashSet<ResourceRef>>,
}

// add/set/get for one multi-valued literal field; the backing set is
// created lazily on first add
macro_rules! literal_field {
    ($field:ident, $add:ident, $set:ident) => {
        pub fn $add(mut self, value: impl Into<String>) -> Self {
            self.$field
                .get_or_insert_with(HashSet::new)
                .insert(value.into());
            self
        }
        pub fn $set(mut self, values: HashSet<String>) -> Self {
            self.$field = Some(values);
            self
        }
        pub fn $field(&self) -> Option<&HashSet<String>> {
            self.$field.as_ref()
        }
    };
}

macro_rules! resource_field {
    ($field:ident, $add:ident, $set:ident) => {
        pub fn $add(mut self, value: ResourceRef) -> Self {
            self.$field.get_or_insert_with(HashSet::new).insert(value);
            self
        }
        pub fn $set(mut self, values: HashSet<ResourceRef>) -> Self {
            self.$field = Some(values);
            self
        }
        pub fn $field(&self) -> Option<&HashSet<ResourceRef>> {
            self.$field.as_ref()
        }
    };
}

impl MetaInfo {
    pub fn new() -> Self {
        Self::default()
    }

    literal_field!(identifiers, add_identifier, set_identifiers);
    literal_field!(titles, add_title, set_titles);
    literal_field!(comments, add_comment, set_comments);
    literal_field!(descriptions, add_description, set_descriptions);
    literal_field!(subjects, add_subject, set_subjects);
    literal_field!(publishers, add_publisher, set_publishers);
    literal_field!(creators, add_creator, set_creators);
    literal_field!(contributors, add_contributor, set_contributors);
    literal_field!(audiences, add_audience, set_audiences);
    literal_field!(rights, add_right, set_rights);

    resource_field!(same_as, add_same_as, set_same_as);
    resource_field!(see_also, add_see_also, set_see_also);
    resource_field!(has_sources, add_has_source, set_has_sources);

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
    pub fn set_date(&mut self, date: Option<NaiveDateTime>) {
        self.date = date;
    }
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    /// True iff every field is absent or empty and no date is set.
    pub fn is_empty(&self) -> bool {
        fn blank<T>(set: &Option<HashSet<T>>) -> bool {
            set.as_ref().map_or(true, |s| s.is_empty())
        }
        blank(&self.identifiers)
            && blank(&self.titles)
            && blank(&self.comments)
            && blank(&self.descriptions)
            && blank(&self.subjects)
            && blank(&self.publishers)
            && blank(&self.creators)
            && blank(&self.contributors)
            && blank(&self.audiences)
            && blank(&self.rights)
            && self.date.is_none()
            && blank(&self.same_as)
            && blank(&self.see_also)
            && blank(&self.has_sources)
    }
}

// an absent field and a present-but-empty field hold the same elements
fn same_set<T: Eq + Hash>(a: &Option<HashSet<T>>, b: &Option<HashSet<T>>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) | (None, Some(x)) => x.is_empty(),
        (None, None) => true,
    }
}

impl PartialEq for MetaInfo {
    fn eq(&self, other: &Self) -> bool {
        same_set(&self.identifiers, &other.identifiers)
            && same_set(&self.titles, &other.titles)
            && same_set(&self.comments, &other.comments)
            && same_set(&self.descriptions, &other.descriptions)
            && same_set(&self.subjects, &other.subjects)
            && same_set(&self.publishers, &other.publishers)
            && same_set(&self.creators, &other.creators)
            && same_set(&self.contributors, &other.contributors)
            && same_set(&self.audiences, &other.audiences)
            && same_set(&self.rights, &other.rights)
            && self.date == other.date
            && same_set(&self.same_as, &other.same_as)
            && same_set(&self.see_also, &other.see_also)
            && same_set(&self.has_sources, &other.has_sources)
    }
}
impl Eq for MetaInfo {}

// order-independent combination: strong per-element hash, wrapping sum
fn orderless<T: Hash>(set: &Option<HashSet<T>>) -> Option<u64> {
    set.as_ref().filter(|s| !s.is_empty()).map(|s| {
        s.iter().fold(0u64, |sum, v| {
            let mut h = SeaHasher::default();
            v.hash(&mut h);
            sum.wrapping_add(h.finish())
        })
    })
}

impl Hash for MetaInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn field<H: Hasher, T: Hash>(tag: u8, set: &Option<HashSet<T>>, state: &mut H) {
            if let Some(sum) = orderless(set) {
                state.write_u8(tag);
                state.write_u64(sum);
            }
        }
        field(1, &self.identifiers, state);
        field(2, &self.titles, state);
        field(3, &self.comments, state);
        field(4, &self.descriptions, state);
        field(5, &self.subjects, state);
        field(6, &self.publishers, state);
        field(7, &self.creators, state);
        field(8, &self.contributors, state);
        field(9, &self.audiences, state);
        field(10, &self.rights, state);
        if let Some(date) = &self.date {
            state.write_u8(11);
            date.hash(state);
        }
        field(12, &self.same_as, state);
        field(13, &self.see_also, state);
        field(14, &self.has_sources, state);
    }
}
