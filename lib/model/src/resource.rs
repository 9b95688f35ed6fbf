use crate::{is_url, is_valid_string, InvalidArgument};
use std::fmt;

/// A bound argument position in a graph pattern.
///
/// Arguments that look like absolute URLs are wrapped in angle brackets when
/// rendered into SPARQL. Everything else passing the string check is assumed
/// to be a prefixed name (e.g. `dbo:Artist`) resolvable through the query
/// prologue and is rendered verbatim.
///
/// ```
/// use lod_fusion_model::Resource;
///
/// let iri = Resource::parse("class", "http://dbpedia.org/ontology/Artist")?;
/// assert_eq!(iri.to_string(), "<http://dbpedia.org/ontology/Artist>");
///
/// let prefixed = Resource::parse("class", "dbo:Artist")?;
/// assert_eq!(prefixed.to_string(), "dbo:Artist");
/// # Result::<_, lod_fusion_model::InvalidArgument>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// An absolute IRI, rendered as `<iri>`.
    Iri(String),
    /// A prefixed name, rendered verbatim.
    Prefixed(String),
}

impl Resource {
    /// Classifies `value` as an IRI or a prefixed name.
    ///
    /// Fails with [`InvalidArgument`] naming `parameter` when `value` is
    /// empty or all whitespace.
    pub fn parse(parameter: &'static str, value: &str) -> Result<Self, InvalidArgument> {
        if !is_valid_string(value) {
            return Err(InvalidArgument::new(parameter));
        }
        Ok(if is_url(value) {
            Resource::Iri(value.to_owned())
        } else {
            Resource::Prefixed(value.to_owned())
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Iri(iri) => write!(f, "<{iri}>"),
            Resource::Prefixed(name) => f.write_str(name),
        }
    }
}
