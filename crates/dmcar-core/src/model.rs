//! Resolved model: records plus their parent links.
//!
//! A [`Model`] owns every record in arena vectors and hands out typed indices
//! ([`DomainId`], [`ClassId`], [`AttributeId`], [`RelationshipId`]). Links
//! between records are [`Reference`]s, which keep a failed lookup apart from a
//! successful one so a diagnostic can never be mistaken for a parent.

use std::fmt;

use crate::record::{
    AttributeRecord, ClassRecord, DomainRecord, End, RelationshipRecord,
};

macro_rules! typed_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            /// Wraps a position in the owning [`Model`] arena.
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position in the owning [`Model`] arena.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

typed_index!(
    /// Index of a [`Domain`] in a [`Model`].
    DomainId
);
typed_index!(
    /// Index of a [`Class`] in a [`Model`].
    ClassId
);
typed_index!(
    /// Index of an [`Attribute`] in a [`Model`].
    AttributeId
);
typed_index!(
    /// Index of a [`Relationship`] in a [`Model`].
    RelationshipId
);

/// The kind of record that holds a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Referrer {
    Domain,
    Class,
    Attribute,
    Relationship(End),
}

/// Diagnostic for a parent lookup that found nothing.
///
/// Records the name that was looked up and the name of the record that
/// asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unresolved {
    referrer: Referrer,
    missing: String,
    referrer_name: String,
}

impl Unresolved {
    /// Creates a diagnostic for `referrer_name` failing to find `missing`.
    pub fn new(
        referrer: Referrer,
        missing: impl Into<String>,
        referrer_name: impl Into<String>,
    ) -> Self {
        Self {
            referrer,
            missing: missing.into(),
            referrer_name: referrer_name.into(),
        }
    }

    /// Kind of the record holding the reference.
    pub fn referrer(&self) -> Referrer {
        self.referrer
    }

    /// The parent name that could not be found.
    pub fn missing(&self) -> &str {
        &self.missing
    }

    /// Name of the record holding the reference.
    pub fn referrer_name(&self) -> &str {
        &self.referrer_name
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.referrer {
            Referrer::Domain => write!(
                f,
                "{} unassigned for domain {}",
                self.missing, self.referrer_name
            ),
            Referrer::Class => write!(
                f,
                "{} unassigned for class {}",
                self.missing, self.referrer_name
            ),
            Referrer::Attribute => write!(
                f,
                "{} unassigned for attribute {}",
                self.missing, self.referrer_name
            ),
            Referrer::Relationship(end) => write!(
                f,
                "{end}: {} unassigned for relationship {}",
                self.missing, self.referrer_name
            ),
        }
    }
}

/// Outcome of resolving a link by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<T> {
    /// The lookup found the target.
    Resolved(T),
    /// The lookup failed; carries the diagnostic.
    Unresolved(Unresolved),
}

impl<T: Copy> Reference<T> {
    /// The resolved target, if any.
    pub fn resolved(&self) -> Option<T> {
        match self {
            Reference::Resolved(target) => Some(*target),
            Reference::Unresolved(_) => None,
        }
    }

    /// The diagnostic, if the lookup failed.
    pub fn unresolved(&self) -> Option<&Unresolved> {
        match self {
            Reference::Resolved(_) => None,
            Reference::Unresolved(diagnostic) => Some(diagnostic),
        }
    }

    /// Converts into a `Result`, surfacing the diagnostic as the error.
    pub fn ok(&self) -> Result<T, &Unresolved> {
        match self {
            Reference::Resolved(target) => Ok(*target),
            Reference::Unresolved(diagnostic) => Err(diagnostic),
        }
    }
}

/// A domain with its resolved parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    record: DomainRecord,
    parent: Option<Reference<DomainId>>,
}

impl Domain {
    /// `parent` is `None` when the record names no parent domain.
    pub fn new(record: DomainRecord, parent: Option<Reference<DomainId>>) -> Self {
        Self { record, parent }
    }

    pub fn record(&self) -> &DomainRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Parent link; `None` for a top-level domain.
    pub fn parent(&self) -> Option<&Reference<DomainId>> {
        self.parent.as_ref()
    }

    /// The parent domain when the link resolved.
    pub fn parent_domain(&self) -> Option<DomainId> {
        self.parent.as_ref().and_then(Reference::resolved)
    }
}

/// A class with its resolved domain and child attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    record: ClassRecord,
    domain: Reference<DomainId>,
    attributes: Vec<AttributeId>,
}

impl Class {
    pub fn new(
        record: ClassRecord,
        domain: Reference<DomainId>,
        attributes: Vec<AttributeId>,
    ) -> Self {
        Self {
            record,
            domain,
            attributes,
        }
    }

    pub fn record(&self) -> &ClassRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    pub fn domain(&self) -> &Reference<DomainId> {
        &self.domain
    }

    /// Attributes that resolved to this class, in model order.
    pub fn attributes(&self) -> &[AttributeId] {
        &self.attributes
    }
}

/// An attribute with its resolved owning class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    record: AttributeRecord,
    class: Reference<ClassId>,
}

impl Attribute {
    pub fn new(record: AttributeRecord, class: Reference<ClassId>) -> Self {
        Self { record, class }
    }

    pub fn record(&self) -> &AttributeRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn class(&self) -> &Reference<ClassId> {
        &self.class
    }
}

/// Resolved links of one relationship end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnd {
    class: Reference<ClassId>,
    attribute: Option<Reference<AttributeId>>,
}

impl ResolvedEnd {
    /// `attribute` is `None` when the end names no attribute.
    pub fn new(class: Reference<ClassId>, attribute: Option<Reference<AttributeId>>) -> Self {
        Self { class, attribute }
    }

    pub fn class(&self) -> &Reference<ClassId> {
        &self.class
    }

    /// Attribute link; `None` when no attribute is named at this end.
    pub fn attribute(&self) -> Option<&Reference<AttributeId>> {
        self.attribute.as_ref()
    }

    /// The linked attribute when one was named and found.
    pub fn linked_attribute(&self) -> Option<AttributeId> {
        self.attribute.as_ref().and_then(Reference::resolved)
    }
}

/// A relationship with both ends resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    record: RelationshipRecord,
    from: ResolvedEnd,
    to: ResolvedEnd,
}

impl Relationship {
    pub fn new(record: RelationshipRecord, from: ResolvedEnd, to: ResolvedEnd) -> Self {
        Self { record, from, to }
    }

    pub fn record(&self) -> &RelationshipRecord {
        &self.record
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn end(&self, end: End) -> &ResolvedEnd {
        match end {
            End::From => &self.from,
            End::To => &self.to,
        }
    }
}

/// The complete, resolved model of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    domains: Vec<Domain>,
    classes: Vec<Class>,
    attributes: Vec<Attribute>,
    relationships: Vec<Relationship>,
}

impl Model {
    pub fn new(
        domains: Vec<Domain>,
        classes: Vec<Class>,
        attributes: Vec<Attribute>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            domains,
            classes,
            attributes,
            relationships,
        }
    }

    /// Returns the domain for `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this model.
    pub fn domain(&self, id: DomainId) -> &Domain {
        &self.domains[id.0]
    }

    /// Returns the class for `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this model.
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    /// Returns the class for `id`, or `None` if it belongs to another model.
    pub fn get_class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.0)
    }

    /// Returns the attribute for `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this model.
    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        &self.attributes[id.0]
    }

    /// Returns the relationship for `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this model.
    pub fn relationship(&self, id: RelationshipId) -> &Relationship {
        &self.relationships[id.0]
    }

    pub fn domains(&self) -> impl Iterator<Item = (DomainId, &Domain)> {
        self.domains
            .iter()
            .enumerate()
            .map(|(idx, domain)| (DomainId(idx), domain))
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (ClassId(idx), class))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (AttributeId, &Attribute)> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(idx, attribute)| (AttributeId(idx), attribute))
    }

    pub fn relationships(&self) -> impl Iterator<Item = (RelationshipId, &Relationship)> {
        self.relationships
            .iter()
            .enumerate()
            .map(|(idx, relationship)| (RelationshipId(idx), relationship))
    }

    pub fn domains_count(&self) -> usize {
        self.domains.len()
    }

    pub fn classes_count(&self) -> usize {
        self.classes.len()
    }

    pub fn attributes_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn relationships_count(&self) -> usize {
        self.relationships.len()
    }

    /// Attributes of `class` in render order.
    ///
    /// Sorted by sequence; equal sequences keep model order.
    pub fn ordered_attributes(&self, class: ClassId) -> Vec<&Attribute> {
        let mut attributes: Vec<&Attribute> = self
            .class(class)
            .attributes()
            .iter()
            .map(|id| self.attribute(*id))
            .collect();
        attributes.sort_by_key(|attribute| attribute.record().sequence);
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_record(name: &str) -> ClassRecord {
        ClassRecord {
            namespace: "ns".to_string(),
            name: name.to_string(),
            label: String::new(),
            description: String::new(),
            domain_name: "Sales".to_string(),
        }
    }

    fn attribute_record(name: &str, sequence: i64) -> AttributeRecord {
        AttributeRecord {
            namespace: "ns".to_string(),
            class_name: "Order".to_string(),
            name: name.to_string(),
            label: String::new(),
            description: String::new(),
            sequence,
            datatype: String::new(),
            nulls: String::new(),
            is_pk: String::new(),
        }
    }

    #[test]
    fn test_unresolved_display() {
        let domain = Unresolved::new(Referrer::Domain, "Core", "Sales");
        assert_eq!(domain.to_string(), "Core unassigned for domain Sales");

        let class = Unresolved::new(Referrer::Class, "Sales", "Order");
        assert_eq!(class.to_string(), "Sales unassigned for class Order");

        let attribute = Unresolved::new(Referrer::Attribute, "Order", "id");
        assert_eq!(attribute.to_string(), "Order unassigned for attribute id");

        let to = Unresolved::new(Referrer::Relationship(End::To), "Customer", "places");
        assert_eq!(
            to.to_string(),
            "to: Customer unassigned for relationship places"
        );
    }

    #[test]
    fn test_reference_accessors() {
        let resolved: Reference<DomainId> = Reference::Resolved(DomainId::new(3));
        assert_eq!(resolved.resolved(), Some(DomainId::new(3)));
        assert!(resolved.unresolved().is_none());
        assert_eq!(resolved.ok(), Ok(DomainId::new(3)));

        let missing = Unresolved::new(Referrer::Class, "Nowhere", "Order");
        let unresolved: Reference<DomainId> = Reference::Unresolved(missing.clone());
        assert_eq!(unresolved.resolved(), None);
        assert_eq!(unresolved.unresolved(), Some(&missing));
        assert_eq!(unresolved.ok(), Err(&missing));
    }

    #[test]
    fn test_ordered_attributes_sorts_by_sequence() {
        let attributes = vec![
            Attribute::new(attribute_record("c", 3), Reference::Resolved(ClassId::new(0))),
            Attribute::new(attribute_record("a", 1), Reference::Resolved(ClassId::new(0))),
            Attribute::new(attribute_record("b", 1), Reference::Resolved(ClassId::new(0))),
        ];
        let class = Class::new(
            class_record("Order"),
            Reference::Resolved(DomainId::new(0)),
            vec![AttributeId::new(0), AttributeId::new(1), AttributeId::new(2)],
        );
        let model = Model::new(Vec::new(), vec![class], attributes, Vec::new());

        let names: Vec<&str> = model
            .ordered_attributes(ClassId::new(0))
            .iter()
            .map(|attribute| attribute.name())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_class_has_no_attributes() {
        let class = Class::new(
            class_record("Empty"),
            Reference::Resolved(DomainId::new(0)),
            Vec::new(),
        );
        let model = Model::new(Vec::new(), vec![class], Vec::new(), Vec::new());
        assert!(model.ordered_attributes(ClassId::new(0)).is_empty());
    }

    #[test]
    fn test_get_class_outside_model() {
        let class = Class::new(
            class_record("Order"),
            Reference::Resolved(DomainId::new(0)),
            Vec::new(),
        );
        let model = Model::new(Vec::new(), vec![class], Vec::new(), Vec::new());
        assert_eq!(model.get_class(ClassId::new(0)).map(Class::name), Some("Order"));
        assert!(model.get_class(ClassId::new(3)).is_none());
    }
}
