use crate::config::{screen_overrides, ConfigRejection};
use std::collections::BTreeMap;

/// The default prefix set, bound to the canonical W3C and DBpedia
/// namespaces.
pub const DEFAULT_NAMESPACES: [(&str, &str); 9] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("prov", "http://www.w3.org/ns/prov#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("xml", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("db", "http://dbpedia.org/"),
    ("dbo", "http://dbpedia.org/ontology/"),
    ("dbp", "http://dbpedia.org/property/"),
];

/// Prefix → namespace-URI mapping rendered into the query prologue.
///
/// Namespace URIs are opaque strings; no validation is applied to them.
/// Iteration order is deterministic, so the prologue is stable across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRegistry {
    entries: BTreeMap<String, String>,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceRegistry {
    /// Creates a registry holding [`DEFAULT_NAMESPACES`].
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_NAMESPACES
                .iter()
                .map(|(prefix, uri)| ((*prefix).to_owned(), (*uri).to_owned()))
                .collect(),
        }
    }

    /// Merges `overrides` into the default set; an override wins over a
    /// default with the same prefix.
    ///
    /// Entries with a blank prefix or URI are dropped and returned as
    /// [`ConfigRejection`]s; construction continues with the rest.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (String, String)>,
    ) -> (Self, Vec<ConfigRejection>) {
        let mut registry = Self::new();
        let (accepted, rejected) = screen_overrides("namespaces", overrides);
        registry.entries.extend(accepted);
        (registry, rejected)
    }

    /// The namespace URI bound to `prefix`, if any.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the SPARQL prologue: one `PREFIX` declaration per entry, one
    /// per line, in iteration order.
    pub fn prologue(&self) -> String {
        self.entries
            .iter()
            .map(|(prefix, uri)| format!("PREFIX {prefix}: <{uri}>\n"))
            .collect()
    }
}
