//! Resolves the full ontological type of a node: the closure of its
//! directly asserted classes under the super-class relation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::graph::{GraphHasher, Iri};
use crate::ontology::{ClassKeeper, OntologicalClass};

/// Worklist fixpoint over the keeper's hierarchy, restricted to the
/// keeper's namespace. Classes asserted in foreign namespaces are left
/// out of the classification (the caller still holds the raw type set),
/// and names the keeper does not know are silently excluded — remote
/// services may assert classes this implementation has never heard of.
/// Cycles in the hierarchy terminate because a class enters the result
/// at most once.
pub fn resolve(
    asserted: &HashSet<Iri, GraphHasher>,
    keeper: &ClassKeeper,
) -> HashSet<Arc<OntologicalClass>> {
    let mut resolved: HashSet<Arc<OntologicalClass>> = HashSet::new();
    let mut work: Vec<Arc<OntologicalClass>> = Vec::new();
    for uri in asserted {
        if !uri.as_str().starts_with(keeper.namespace()) {
            continue;
        }
        match keeper.get(uri) {
            Some(class) => {
                if resolved.insert(Arc::clone(&class)) {
                    work.push(class);
                }
            }
            None => debug!(class = %uri, "asserted class not in registry, excluded"),
        }
    }
    while let Some(class) = work.pop() {
        for parent in class.supers() {
            if let Some(parent) = keeper.get(parent) {
                if resolved.insert(Arc::clone(&parent)) {
                    work.push(parent);
                }
            }
        }
    }
    resolved
}
