//! Row marshalling: typed records out of wide table rows.
//!
//! Every row may contribute a domain, a class, an attribute and a
//! relationship. Records are deduplicated on their identity keys; the first
//! row seen for a key wins and later rows for the same key are ignored
//! without being coerced.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use dmcar_core::{
    cell::cardinality_is_one,
    record::{
        AttributeRecord, ClassRecord, DomainRecord, EndRecord, Key, Records, RelationshipRecord,
    },
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    table::{Column, Row, Table},
};

/// Marshals every row of `table` into deduplicated records.
///
/// Rows whose key name cells are blank contribute no record of that kind:
/// a row without a `Class` adds no class, a row needs both `Class` and
/// `Attribute` to add an attribute.
///
/// # Errors
///
/// Returns a [`ParseError`] with one [`ErrorCode::E100`] diagnostic per
/// malformed `Sequence` value.
pub fn marshal(table: &Table) -> Result<Records, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut domains: IndexMap<Key, DomainRecord> = IndexMap::new();
    let mut classes: IndexMap<Key, ClassRecord> = IndexMap::new();
    let mut attributes: IndexMap<Key, AttributeRecord> = IndexMap::new();
    let mut relationships: IndexMap<Key, RelationshipRecord> = IndexMap::new();

    for (idx, row) in table.rows().iter().enumerate() {
        let namespace = text(row, Column::Namespace);

        let domain = text(row, Column::Domain);
        if !domain.trim().is_empty() {
            domains
                .entry(Key::new(&namespace, &domain))
                .or_insert_with(|| marshal_domain(row));
        }

        let class = text(row, Column::Class);
        if !class.trim().is_empty() {
            classes
                .entry(Key::new(&namespace, &class))
                .or_insert_with(|| marshal_class(row));

            let attribute = text(row, Column::Attribute);
            if !attribute.trim().is_empty() {
                if let Entry::Vacant(entry) =
                    attributes.entry(Key::nested(&namespace, &class, &attribute))
                {
                    match marshal_attribute(row) {
                        Ok(record) => {
                            entry.insert(record);
                        }
                        Err(diag) => collector.emit(diag.with_row(idx + 1)),
                    }
                }
            }
        }

        let relationship = text(row, Column::Relationship);
        if !relationship.trim().is_empty() {
            relationships
                .entry(Key::new(&namespace, &relationship))
                .or_insert_with(|| marshal_relationship(row));
        }
    }

    collector.finish()?;

    let records = Records {
        domains: domains.into_values().collect(),
        classes: classes.into_values().collect(),
        attributes: attributes.into_values().collect(),
        relationships: relationships.into_values().collect(),
    };
    debug!(
        domains = records.domains.len(),
        classes = records.classes.len(),
        attributes = records.attributes.len(),
        relationships = records.relationships.len();
        "Rows marshalled"
    );
    trace!(records:?; "Marshalled records");

    Ok(records)
}

fn text(row: &Row, column: Column) -> String {
    row.get(column).to_text()
}

fn marshal_domain(row: &Row) -> DomainRecord {
    DomainRecord {
        namespace: text(row, Column::Namespace),
        name: text(row, Column::Domain),
        label: text(row, Column::DomainLabel),
        description: text(row, Column::DomainDescription),
        parent_name: text(row, Column::ParentDomain),
    }
}

fn marshal_class(row: &Row) -> ClassRecord {
    ClassRecord {
        namespace: text(row, Column::Namespace),
        name: text(row, Column::Class),
        label: text(row, Column::ClassLabel),
        description: text(row, Column::ClassDescription),
        domain_name: text(row, Column::Domain),
    }
}

fn marshal_attribute(row: &Row) -> Result<AttributeRecord, Diagnostic> {
    let sequence = row.get(Column::Sequence).to_integer().map_err(|err| {
        Diagnostic::error(format!("malformed Sequence value `{}`", err.value()))
            .with_code(ErrorCode::E100)
            .with_help("Sequence must be a whole number")
    })?;

    Ok(AttributeRecord {
        namespace: text(row, Column::Namespace),
        class_name: text(row, Column::Class),
        name: text(row, Column::Attribute),
        label: text(row, Column::AttributeLabel),
        description: text(row, Column::AttributeDescription),
        sequence,
        datatype: text(row, Column::DataType),
        nulls: text(row, Column::Nulls),
        is_pk: text(row, Column::IsPK),
    })
}

fn marshal_end(
    row: &Row,
    namespace: Column,
    class: Column,
    attribute: Column,
    cardinality: Column,
) -> EndRecord {
    EndRecord {
        namespace: text(row, namespace),
        class_name: text(row, class),
        attribute_name: text(row, attribute),
        cardinality: text(row, cardinality),
        cardinality_one: cardinality_is_one(row.get(cardinality)),
    }
}

fn marshal_relationship(row: &Row) -> RelationshipRecord {
    RelationshipRecord {
        namespace: text(row, Column::Namespace),
        name: text(row, Column::Relationship),
        label: text(row, Column::RelationshipLabel),
        description: text(row, Column::RelationshipDescription),
        kind: text(row, Column::RelationshipType),
        from: marshal_end(
            row,
            Column::FromNamespace,
            Column::FromClass,
            Column::FromAttribute,
            Column::FromCardinality,
        ),
        to: marshal_end(
            row,
            Column::ToNamespace,
            Column::ToClass,
            Column::ToAttribute,
            Column::ToCardinality,
        ),
    }
}
