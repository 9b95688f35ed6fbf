use lod_fusion_model::{is_valid_string, InvalidArgument, Resource};

/// An abstract, parameterized description of an RDF query.
///
/// Each variant corresponds to one graph-pattern shape from the template
/// catalog. Variants are constructed through the associated functions, which
/// validate their string arguments and classify them as IRIs or prefixed
/// names; a blank argument fails with [`InvalidArgument`] naming the
/// parameter, before any query text exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// URIs of entities typed as `owl:Class`.
    Classes,
    /// URIs of subclasses of a class.
    SubClasses { super_class: Resource },
    /// URIs of superclasses of a class.
    SuperClasses { sub_class: Resource },
    /// URIs of classes equivalent to a class.
    EquivalentClasses { class: Resource },
    /// URIs of classes disjoint with a class.
    DisjointClasses { class: Resource },
    /// URIs of subproperties of a property.
    SubProperties { super_property: Resource },
    /// URIs of superproperties of a property.
    SuperProperties { sub_property: Resource },
    /// Subjects appearing with the given predicate and object.
    Subjects { predicate: Resource, object: Resource },
    /// Predicates appearing between the given subject and object.
    Predicates { subject: Resource, object: Resource },
    /// Objects appearing with the given subject and predicate.
    Objects { subject: Resource, predicate: Resource },
    /// Full triples; unset positions act as query variables.
    Triples {
        subject: Option<Resource>,
        predicate: Option<Resource>,
        object: Option<Resource>,
    },
    /// Instances of a class, optionally matching through subclasses.
    InstancesOfClass {
        class: Resource,
        include_subclasses: bool,
    },
    /// Labels of an entity, optionally restricted to a language tag.
    Labels {
        entity: Resource,
        language: Option<String>,
    },
}

impl QueryIntent {
    pub fn classes() -> Self {
        QueryIntent::Classes
    }

    pub fn sub_classes(super_class: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::SubClasses {
            super_class: Resource::parse("super_class", super_class)?,
        })
    }

    pub fn super_classes(sub_class: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::SuperClasses {
            sub_class: Resource::parse("sub_class", sub_class)?,
        })
    }

    pub fn equivalent_classes(class: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::EquivalentClasses {
            class: Resource::parse("class", class)?,
        })
    }

    pub fn disjoint_classes(class: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::DisjointClasses {
            class: Resource::parse("class", class)?,
        })
    }

    pub fn sub_properties(super_property: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::SubProperties {
            super_property: Resource::parse("super_property", super_property)?,
        })
    }

    pub fn super_properties(sub_property: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::SuperProperties {
            sub_property: Resource::parse("sub_property", sub_property)?,
        })
    }

    pub fn subjects(predicate: &str, object: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::Subjects {
            predicate: Resource::parse("predicate", predicate)?,
            object: Resource::parse("object", object)?,
        })
    }

    pub fn predicates(subject: &str, object: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::Predicates {
            subject: Resource::parse("subject", subject)?,
            object: Resource::parse("object", object)?,
        })
    }

    pub fn objects(subject: &str, predicate: &str) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::Objects {
            subject: Resource::parse("subject", subject)?,
            predicate: Resource::parse("predicate", predicate)?,
        })
    }

    /// Builds a triple-pattern intent. An unset position is rendered as a
    /// fresh query variable rather than failing.
    pub fn triples(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::Triples {
            subject: subject
                .map(|value| Resource::parse("subject", value))
                .transpose()?,
            predicate: predicate
                .map(|value| Resource::parse("predicate", value))
                .transpose()?,
            object: object
                .map(|value| Resource::parse("object", value))
                .transpose()?,
        })
    }

    pub fn instances_of_class(
        class: &str,
        include_subclasses: bool,
    ) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::InstancesOfClass {
            class: Resource::parse("class", class)?,
            include_subclasses,
        })
    }

    /// Builds a label lookup. A blank `language` tag is treated as absent,
    /// matching labels in any language.
    pub fn labels(entity: &str, language: Option<&str>) -> Result<Self, InvalidArgument> {
        Ok(QueryIntent::Labels {
            entity: Resource::parse("entity", entity)?,
            language: language
                .filter(|tag| is_valid_string(tag))
                .map(str::to_owned),
        })
    }
}
