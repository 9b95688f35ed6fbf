use crate::QueryIntent;
use lod_fusion_model::Resource;
use std::fmt;

/// An immutable SPARQL `SELECT` body produced from a [`QueryIntent`].
///
/// The body carries no namespace prologue and no `LIMIT`; both are
/// endpoint-invariant and are appended exactly once per dispatch through
/// [`RenderedQuery::compose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    body: String,
}

impl RenderedQuery {
    /// Wraps a caller-written `SELECT` body so it can be composed and
    /// dispatched like a templated one. The body is taken as-is.
    pub fn raw(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// The `SELECT` body without prologue or `LIMIT`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Builds the final query text: prologue, then the body, then the
    /// optional `LIMIT` clause.
    pub fn compose(&self, prologue: &str, limit: Option<u64>) -> String {
        match limit {
            Some(limit) => format!("{prologue}{} LIMIT {limit}", self.body),
            None => format!("{prologue}{}", self.body),
        }
    }
}

impl fmt::Display for RenderedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl QueryIntent {
    /// Renders the intent into its `SELECT` body.
    ///
    /// Every single-column shape projects its result variable as `?uri`,
    /// except [`QueryIntent::Labels`] which projects `?label`;
    /// [`QueryIntent::Triples`] projects all three positions.
    pub fn render(&self) -> RenderedQuery {
        let body = match self {
            QueryIntent::Classes => {
                select_single("(?class AS ?uri)", "?class rdf:type owl:Class .")
            }
            QueryIntent::SubClasses { super_class } => select_single(
                "(?subclass AS ?uri)",
                &format!("?subclass rdfs:subClassOf {super_class} ."),
            ),
            QueryIntent::SuperClasses { sub_class } => select_single(
                "(?superclass AS ?uri)",
                &format!("{sub_class} rdfs:subClassOf ?superclass ."),
            ),
            QueryIntent::EquivalentClasses { class } => select_single(
                "(?equivalent_class AS ?uri)",
                &format!("?equivalent_class owl:equivalentClass {class} ."),
            ),
            QueryIntent::DisjointClasses { class } => select_single(
                "(?disjoint_class AS ?uri)",
                &format!("?disjoint_class owl:disjointWith {class} ."),
            ),
            QueryIntent::SubProperties { super_property } => select_single(
                "(?subproperty AS ?uri)",
                &format!("?subproperty rdfs:subPropertyOf {super_property} ."),
            ),
            QueryIntent::SuperProperties { sub_property } => select_single(
                "(?superproperty AS ?uri)",
                &format!("{sub_property} rdfs:subPropertyOf ?superproperty ."),
            ),
            QueryIntent::Subjects { predicate, object } => select_single(
                "(?subject AS ?uri)",
                &format!("?subject {predicate} {object} ."),
            ),
            QueryIntent::Predicates { subject, object } => select_single(
                "(?predicate AS ?uri)",
                &format!("{subject} ?predicate {object} ."),
            ),
            QueryIntent::Objects { subject, predicate } => select_single(
                "(?object AS ?uri)",
                &format!("{subject} {predicate} ?object ."),
            ),
            QueryIntent::Triples {
                subject,
                predicate,
                object,
            } => select_single(
                "?subject ?predicate ?object",
                &format!(
                    "{} {} {} .",
                    position(subject, "subject"),
                    position(predicate, "predicate"),
                    position(object, "object"),
                ),
            ),
            QueryIntent::InstancesOfClass {
                class,
                include_subclasses,
            } => {
                // The `*` path modifier matches instances transitively
                // through the subclass hierarchy.
                let path = if *include_subclasses {
                    "rdf:type*"
                } else {
                    "rdf:type"
                };
                select_single("(?instance AS ?uri)", &format!("?instance {path} {class} ."))
            }
            QueryIntent::Labels { entity, language } => {
                // The tag is interpolated verbatim; callers are responsible
                // for supplying a well-formed BCP-47 tag.
                let pattern = match language {
                    Some(tag) => format!(
                        "{entity} rdfs:label ?label .\n    FILTER (LANG(?label) = '{tag}')"
                    ),
                    None => format!("{entity} rdfs:label ?label ."),
                };
                select_single("?label", &pattern)
            }
        };
        RenderedQuery { body }
    }
}

fn select_single(projection: &str, pattern: &str) -> String {
    format!("SELECT DISTINCT {projection}\nWHERE {{\n    {pattern}\n}}")
}

fn position(resource: &Option<Resource>, variable: &str) -> String {
    match resource {
        Some(resource) => resource.to_string(),
        None => format!("?{variable}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lod_fusion_model::InvalidArgument;

    #[test]
    fn classes_projects_uri() {
        let body = QueryIntent::classes().render().body().to_owned();
        assert_eq!(
            body,
            "SELECT DISTINCT (?class AS ?uri)\nWHERE {\n    ?class rdf:type owl:Class .\n}"
        );
    }

    #[test]
    fn prefixed_names_stay_unwrapped_and_urls_get_wrapped() -> Result<(), InvalidArgument> {
        let prefixed = QueryIntent::sub_classes("dbo:Artist")?.render();
        assert!(prefixed
            .body()
            .contains("?subclass rdfs:subClassOf dbo:Artist ."));

        let url = QueryIntent::sub_classes("http://dbpedia.org/ontology/Artist")?.render();
        assert!(url
            .body()
            .contains("?subclass rdfs:subClassOf <http://dbpedia.org/ontology/Artist> ."));
        Ok(())
    }

    #[test]
    fn unbound_triple_positions_become_fresh_variables() -> Result<(), InvalidArgument> {
        let rendered = QueryIntent::triples(None, None, None)?.render();
        assert_eq!(
            rendered.body(),
            "SELECT DISTINCT ?subject ?predicate ?object\nWHERE {\n    ?subject ?predicate ?object .\n}"
        );

        let rendered = QueryIntent::triples(None, Some("rdf:type"), Some("dbo:Artist"))?.render();
        assert!(rendered.body().contains("?subject rdf:type dbo:Artist ."));
        Ok(())
    }

    #[test]
    fn transitive_instances_use_a_path_modifier() -> Result<(), InvalidArgument> {
        let direct = QueryIntent::instances_of_class("dbo:Artist", false)?.render();
        assert!(direct.body().contains("?instance rdf:type dbo:Artist ."));
        assert!(!direct.body().contains("rdf:type*"));

        let transitive = QueryIntent::instances_of_class("dbo:Artist", true)?.render();
        assert!(transitive.body().contains("?instance rdf:type* dbo:Artist ."));
        Ok(())
    }

    #[test]
    fn labels_filter_only_when_a_language_is_given() -> Result<(), InvalidArgument> {
        let tagged = QueryIntent::labels("dbo:Artist", Some("en"))?.render();
        assert!(tagged.body().contains("dbo:Artist rdfs:label ?label ."));
        assert!(tagged.body().contains("FILTER (LANG(?label) = 'en')"));

        let untagged = QueryIntent::labels("dbo:Artist", None)?.render();
        assert!(!untagged.body().contains("FILTER"));
        Ok(())
    }

    #[test]
    fn compose_appends_prologue_and_limit() -> Result<(), InvalidArgument> {
        let rendered = QueryIntent::sub_classes("dbo:Artist")?.render();
        let text = rendered.compose("PREFIX dbo: <http://dbpedia.org/ontology/>\n", Some(10));
        assert!(text.starts_with("PREFIX dbo: <http://dbpedia.org/ontology/>\nSELECT DISTINCT"));
        assert!(text.ends_with("} LIMIT 10"));

        let text = rendered.compose("", None);
        assert!(text.starts_with("SELECT DISTINCT"));
        assert!(!text.contains("LIMIT"));
        Ok(())
    }
}
