//! Raw records marshalled from tabular rows.
//!
//! These are the identity-bearing halves of the model: every field is already
//! coerced, and none of them is touched again once marshalling is done. The
//! parent links live next to them in [`crate::model`], where the resolver puts
//! them.

use std::fmt;

/// Namespace-qualified identity of a record.
///
/// Domains and classes are keyed by `(namespace, name)`, attributes by
/// `(namespace, class, name)`. The path segments are compared exactly, so a
/// dot inside a name can never collide with a different split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    namespace: String,
    path: Vec<String>,
}

impl Key {
    /// Key for a domain, class or relationship.
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            path: vec![name.to_string()],
        }
    }

    /// Key for an attribute of `class`.
    pub fn nested(namespace: &str, class: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            path: vec![class.to_string(), name.to_string()],
        }
    }

    /// Returns the namespace part of the key.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.namespace)?;
        for segment in &self.path {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// A domain row: a node in the containment tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub namespace: String,
    pub name: String,
    pub label: String,
    pub description: String,
    /// Name of the parent domain in the same namespace, blank for top-level domains.
    pub parent_name: String,
}

impl DomainRecord {
    /// Identity key `(namespace, name)`.
    pub fn key(&self) -> Key {
        Key::new(&self.namespace, &self.name)
    }
}

/// A class row: an entity box on the diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub namespace: String,
    pub name: String,
    pub label: String,
    pub description: String,
    pub domain_name: String,
}

impl ClassRecord {
    /// Identity key `(namespace, name)`.
    pub fn key(&self) -> Key {
        Key::new(&self.namespace, &self.name)
    }
}

/// An attribute row: a field of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub namespace: String,
    pub class_name: String,
    pub name: String,
    pub label: String,
    pub description: String,
    /// Render order within the class.
    pub sequence: i64,
    /// Free-text data type.
    pub datatype: String,
    /// Raw nulls indicator, exactly as it appeared in the row.
    pub nulls: String,
    /// Raw primary-key indicator, exactly as it appeared in the row.
    pub is_pk: String,
}

impl AttributeRecord {
    /// Identity key `(namespace, class, name)`.
    pub fn key(&self) -> Key {
        Key::nested(&self.namespace, &self.class_name, &self.name)
    }

    /// Key of the owning class.
    pub fn class_key(&self) -> Key {
        Key::new(&self.namespace, &self.class_name)
    }

    /// Whether the raw primary-key indicator marks this attribute as a key.
    ///
    /// Any non-blank value counts, except the explicit negatives `no`,
    /// `false` and `0`.
    pub fn is_primary_key(&self) -> bool {
        let value = self.is_pk.trim();
        !(value.is_empty()
            || value.eq_ignore_ascii_case("no")
            || value.eq_ignore_ascii_case("false")
            || value == "0")
    }
}

/// Which end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    From,
    To,
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::From => write!(f, "from"),
            End::To => write!(f, "to"),
        }
    }
}

/// One end of a relationship row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRecord {
    pub namespace: String,
    pub class_name: String,
    /// Attribute name, blank when the end is not tied to an attribute.
    pub attribute_name: String,
    pub cardinality: String,
    pub cardinality_one: bool,
}

impl EndRecord {
    /// Key of the class at this end.
    pub fn class_key(&self) -> Key {
        Key::new(&self.namespace, &self.class_name)
    }

    /// Key of the attribute at this end, if one is named.
    pub fn attribute_key(&self) -> Option<Key> {
        if self.attribute_name.trim().is_empty() {
            None
        } else {
            Some(Key::nested(
                &self.namespace,
                &self.class_name,
                &self.attribute_name,
            ))
        }
    }
}

/// A relationship row: a directed, typed edge between two classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRecord {
    pub namespace: String,
    pub name: String,
    pub label: String,
    pub description: String,
    pub kind: String,
    pub from: EndRecord,
    pub to: EndRecord,
}

impl RelationshipRecord {
    /// Identity key `(namespace, name)`.
    pub fn key(&self) -> Key {
        Key::new(&self.namespace, &self.name)
    }

    /// Returns the requested end.
    pub fn end(&self, end: End) -> &EndRecord {
        match end {
            End::From => &self.from,
            End::To => &self.to,
        }
    }
}

/// Every record marshalled from one table, deduplicated and in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub domains: Vec<DomainRecord>,
    pub classes: Vec<ClassRecord>,
    pub attributes: Vec<AttributeRecord>,
    pub relationships: Vec<RelationshipRecord>,
}
