//! Cross-reference resolution.
//!
//! Builds a key index for every record kind, then wires each record to its
//! parent(s). All indices are complete before the first lookup, so the
//! outcome does not depend on record order. Failed lookups become
//! [`Reference::Unresolved`] values plus a warning [`Diagnostic`].

use std::collections::HashMap;

use log::debug;

use dmcar_core::{
    model::{
        Attribute, AttributeId, Class, ClassId, Domain, DomainId, Model, Reference, Referrer,
        Relationship, ResolvedEnd, Unresolved,
    },
    record::{End, EndRecord, Key, Records, RelationshipRecord},
};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

/// A resolved model together with the warnings produced while linking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    model: Model,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// The resolved model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Warnings for every reference that could not be resolved.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits into the model and its warnings.
    pub fn into_parts(self) -> (Model, Vec<Diagnostic>) {
        (self.model, self.diagnostics)
    }
}

/// Lookup tables from identity key to arena index.
struct Indices {
    domains: HashMap<Key, DomainId>,
    classes: HashMap<Key, ClassId>,
    attributes: HashMap<Key, AttributeId>,
}

impl Indices {
    fn new(records: &Records) -> Self {
        Self {
            domains: records
                .domains
                .iter()
                .enumerate()
                .map(|(idx, record)| (record.key(), DomainId::new(idx)))
                .collect(),
            classes: records
                .classes
                .iter()
                .enumerate()
                .map(|(idx, record)| (record.key(), ClassId::new(idx)))
                .collect(),
            attributes: records
                .attributes
                .iter()
                .enumerate()
                .map(|(idx, record)| (record.key(), AttributeId::new(idx)))
                .collect(),
        }
    }
}

/// Links every record to its parents.
///
/// `records` is left untouched; the returned model holds copies of the
/// records plus their links, so resolving the same records twice yields equal
/// models.
pub fn resolve(records: &Records) -> Resolution {
    let indices = Indices::new(records);
    let mut collector = DiagnosticCollector::new();

    let domains = records
        .domains
        .iter()
        .map(|record| {
            let parent = if record.parent_name.trim().is_empty() {
                None
            } else {
                let reference = lookup(
                    &indices.domains,
                    &Key::new(&record.namespace, &record.parent_name),
                    || Unresolved::new(Referrer::Domain, &record.parent_name, &record.name),
                );
                report(&reference, ErrorCode::E200, &mut collector);
                Some(reference)
            };
            Domain::new(record.clone(), parent)
        })
        .collect();

    let attribute_classes: Vec<Reference<ClassId>> = records
        .attributes
        .iter()
        .map(|record| {
            let reference = lookup(&indices.classes, &record.class_key(), || {
                Unresolved::new(Referrer::Attribute, &record.class_name, &record.name)
            });
            report(&reference, ErrorCode::E202, &mut collector);
            reference
        })
        .collect();

    let mut children: Vec<Vec<AttributeId>> = vec![Vec::new(); records.classes.len()];
    for (idx, reference) in attribute_classes.iter().enumerate() {
        if let Some(class) = reference.resolved() {
            children[class.index()].push(AttributeId::new(idx));
        }
    }

    let classes = records
        .classes
        .iter()
        .zip(children)
        .map(|(record, attributes)| {
            let domain = lookup(
                &indices.domains,
                &Key::new(&record.namespace, &record.domain_name),
                || Unresolved::new(Referrer::Class, &record.domain_name, &record.name),
            );
            report(&domain, ErrorCode::E201, &mut collector);
            Class::new(record.clone(), domain, attributes)
        })
        .collect();

    let attributes = records
        .attributes
        .iter()
        .zip(attribute_classes)
        .map(|(record, class)| Attribute::new(record.clone(), class))
        .collect();

    let relationships = records
        .relationships
        .iter()
        .map(|record| {
            let from = resolve_end(&indices, record, End::From, &mut collector);
            let to = resolve_end(&indices, record, End::To, &mut collector);
            Relationship::new(record.clone(), from, to)
        })
        .collect();

    let model = Model::new(domains, classes, attributes, relationships);
    let diagnostics = collector.into_diagnostics();
    debug!(
        domains = model.domains_count(),
        classes = model.classes_count(),
        attributes = model.attributes_count(),
        relationships = model.relationships_count(),
        unresolved = diagnostics.len();
        "References resolved"
    );

    Resolution { model, diagnostics }
}

fn resolve_end(
    indices: &Indices,
    record: &RelationshipRecord,
    end: End,
    collector: &mut DiagnosticCollector,
) -> ResolvedEnd {
    let end_record: &EndRecord = record.end(end);

    let class = lookup(&indices.classes, &end_record.class_key(), || {
        Unresolved::new(Referrer::Relationship(end), &end_record.class_name, &record.name)
    });
    report(&class, ErrorCode::E203, collector);

    let attribute = end_record.attribute_key().map(|key| {
        let reference = lookup(&indices.attributes, &key, || {
            Unresolved::new(
                Referrer::Relationship(end),
                format!("{}.{}", end_record.class_name, end_record.attribute_name),
                &record.name,
            )
        });
        report(&reference, ErrorCode::E204, collector);
        reference
    });

    ResolvedEnd::new(class, attribute)
}

fn lookup<T: Copy>(
    index: &HashMap<Key, T>,
    key: &Key,
    unresolved: impl FnOnce() -> Unresolved,
) -> Reference<T> {
    match index.get(key) {
        Some(target) => Reference::Resolved(*target),
        None => Reference::Unresolved(unresolved()),
    }
}

fn report<T: Copy>(reference: &Reference<T>, code: ErrorCode, collector: &mut DiagnosticCollector) {
    if let Some(unresolved) = reference.unresolved() {
        debug!(code:? = code, missing = unresolved.missing(), referrer = unresolved.referrer_name(); "{unresolved}");
        collector.emit(Diagnostic::warning(unresolved.to_string()).with_code(code));
    }
}
