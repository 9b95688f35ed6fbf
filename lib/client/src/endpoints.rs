use crate::config::{screen_overrides, ConfigRejection};
use std::collections::BTreeMap;

/// The endpoints queried when no overrides are supplied.
pub const DEFAULT_ENDPOINTS: [(&str, &str); 2] = [
    ("DBpedia", "http://dbpedia.org/sparql"),
    ("GeoLinkedData", "http://linkedgeodata.org/sparql"),
];

/// Endpoint-name → endpoint-URL mapping.
///
/// Unlike [`NamespaceRegistry`](crate::NamespaceRegistry) overrides, endpoint
/// overrides *replace* the default set instead of merging into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    entries: BTreeMap<String, String>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointRegistry {
    /// Creates a registry holding [`DEFAULT_ENDPOINTS`].
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_ENDPOINTS
                .iter()
                .map(|(name, url)| ((*name).to_owned(), (*url).to_owned()))
                .collect(),
        }
    }

    /// Builds a registry from `overrides` alone, discarding the defaults.
    ///
    /// Entries with a blank name or URL are dropped and returned as
    /// [`ConfigRejection`]s; construction continues with the rest.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (String, String)>,
    ) -> (Self, Vec<ConfigRejection>) {
        let (accepted, rejected) = screen_overrides("endpoints", overrides);
        (
            Self {
                entries: accepted.into_iter().collect(),
            },
            rejected,
        )
    }

    /// The URL registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, url)| (name.as_str(), url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
