//! Small builder for models used across unit tests.

use dmcar_core::{
    cell::{Cell, cardinality_is_one},
    model::Model,
    record::{
        AttributeRecord, ClassRecord, DomainRecord, EndRecord, Records, RelationshipRecord,
    },
};

const NAMESPACE: &str = "test";

/// One relationship end: class, attribute (may be blank) and cardinality.
pub(crate) type EndSpec<'a> = (&'a str, &'a str, &'a str);

#[derive(Default)]
pub(crate) struct ModelBuilder {
    records: Records,
}

impl ModelBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn domain(mut self, name: &str, parent: &str) -> Self {
        self.records.domains.push(DomainRecord {
            namespace: NAMESPACE.to_string(),
            name: name.to_string(),
            label: String::new(),
            description: String::new(),
            parent_name: parent.to_string(),
        });
        self
    }

    pub(crate) fn class(mut self, name: &str, domain: &str) -> Self {
        self.records.classes.push(ClassRecord {
            namespace: NAMESPACE.to_string(),
            name: name.to_string(),
            label: name.to_string(),
            description: String::new(),
            domain_name: domain.to_string(),
        });
        self
    }

    pub(crate) fn attribute(
        mut self,
        class: &str,
        name: &str,
        datatype: &str,
        nulls: &str,
        is_pk: &str,
    ) -> Self {
        let sequence = self.records.attributes.len() as i64;
        self.records.attributes.push(AttributeRecord {
            namespace: NAMESPACE.to_string(),
            class_name: class.to_string(),
            name: name.to_string(),
            label: String::new(),
            description: String::new(),
            sequence,
            datatype: datatype.to_string(),
            nulls: nulls.to_string(),
            is_pk: is_pk.to_string(),
        });
        self
    }

    pub(crate) fn relationship(mut self, name: &str, from: EndSpec<'_>, to: EndSpec<'_>) -> Self {
        self.records.relationships.push(RelationshipRecord {
            namespace: NAMESPACE.to_string(),
            name: name.to_string(),
            label: name.to_string(),
            description: String::new(),
            kind: String::new(),
            from: end(from),
            to: end(to),
        });
        self
    }

    pub(crate) fn build(self) -> Model {
        dmcar_parser::resolve(&self.records).into_parts().0
    }
}

fn end((class, attribute, cardinality): EndSpec<'_>) -> EndRecord {
    EndRecord {
        namespace: NAMESPACE.to_string(),
        class_name: class.to_string(),
        attribute_name: attribute.to_string(),
        cardinality: cardinality.to_string(),
        cardinality_one: cardinality_is_one(&Cell::from(cardinality)),
    }
}
