//! Mermaid `erDiagram` backend.
//!
//! Output layout:
//!
//! ```text
//! erDiagram
//!     Order["Customer order"] {
//!         int id PK
//!         int customer_id
//!     }
//!     Order }|--|| Customer : "places"
//! ```
//!
//! Class blocks come first in model order, then one line per relationship.
//! Relationship end tokens follow crow's-foot notation: the left token is
//! cardinality then optionality, the right token is optionality then
//! cardinality.

use std::fmt;

use dmcar_core::{
    model::{Attribute, ClassId, Model, Relationship},
    record::End,
};

use crate::{config::RenderConfig, export::Exporter};

const INDENT: &str = "    ";

/// Key constraint markers on an attribute line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMarker {
    Primary,
    Foreign,
    Unique,
}

impl fmt::Display for KeyMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMarker::Primary => write!(f, "PK"),
            KeyMarker::Foreign => write!(f, "FK"),
            KeyMarker::Unique => write!(f, "UK"),
        }
    }
}

/// Renders models as Mermaid entity-relationship diagrams.
#[derive(Debug, Clone, Default)]
pub struct MermaidExporter {
    config: RenderConfig,
}

impl MermaidExporter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn class_block(&self, model: &Model, class: ClassId) -> Vec<String> {
        let record = model.class(class).record();
        let header = if record.label.trim().is_empty() {
            format!("{INDENT}{} {{", record.name)
        } else {
            format!("{INDENT}{}[\"{}\"] {{", record.name, escape(&record.label))
        };

        let mut lines = vec![header];
        lines.extend(
            model
                .ordered_attributes(class)
                .into_iter()
                .map(|attribute| self.attribute_line(attribute)),
        );
        lines.push(format!("{INDENT}}}"));
        lines
    }

    fn attribute_line(&self, attribute: &Attribute) -> String {
        let record = attribute.record();
        let datatype = escape(&record.datatype);
        let datatype = if datatype.trim().is_empty() {
            "_"
        } else {
            datatype.as_str()
        };

        let mut line = format!("{INDENT}{INDENT}{datatype} {}", escape(&record.name));

        let markers = key_markers(attribute);
        if !markers.is_empty() {
            line.push(' ');
            line.push_str(&join_markers(&markers));
        }

        if self.config.include_descriptions() && !record.description.trim().is_empty() {
            line.push_str(&format!(" \"{}\"", escape(&record.description)));
        }
        line
    }
}

impl Exporter for MermaidExporter {
    fn export_model(&self, model: &Model) -> String {
        let mut lines = vec!["erDiagram".to_string()];

        for (id, _) in model.classes() {
            lines.extend(self.class_block(model, id));
        }
        for (_, relationship) in model.relationships() {
            lines.push(relationship_line(model, relationship));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Decodes a textual nulls flag: `yes`, `true` and `1` (any case) mean
/// nullable, anything else does not.
pub fn decode_nulls(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true") || value == "1"
}

/// Makes `text` safe inside a double-quoted Mermaid string.
pub fn escape(text: &str) -> String {
    text.replace('"', "''")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// Markers for `attribute`; only primary keys are derived from the model.
pub fn key_markers(attribute: &Attribute) -> Vec<KeyMarker> {
    if attribute.record().is_primary_key() {
        vec![KeyMarker::Primary]
    } else {
        Vec::new()
    }
}

/// Comma-joined marker list, e.g. `PK,FK`.
pub fn join_markers(markers: &[KeyMarker]) -> String {
    markers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Crow's-foot token for one end of `relationship`.
pub fn end_token(model: &Model, relationship: &Relationship, end: End) -> String {
    let record = relationship.record().end(end);

    let optionality = match relationship.end(end).linked_attribute() {
        Some(attribute) if !decode_nulls(&model.attribute(attribute).record().nulls) => '|',
        _ => 'o',
    };
    let cardinality = match (record.cardinality_one, end) {
        (true, _) => '|',
        (false, End::From) => '}',
        (false, End::To) => '{',
    };

    match end {
        End::From => format!("{cardinality}{optionality}"),
        End::To => format!("{optionality}{cardinality}"),
    }
}

fn relationship_line(model: &Model, relationship: &Relationship) -> String {
    let record = relationship.record();
    format!(
        "{INDENT}{} {}--{} {} : \"{}\"",
        record.from.class_name,
        end_token(model, relationship, End::From),
        end_token(model, relationship, End::To),
        record.to.class_name,
        escape(&record.label)
    )
}

#[cfg(test)]
mod tests {
    use dmcar_core::{
        model::{AttributeId, RelationshipId},
        record::AttributeRecord,
    };

    use super::*;
    use crate::test_utils::ModelBuilder;

    fn render(model: &Model) -> String {
        MermaidExporter::default().export_model(model)
    }

    #[test]
    fn test_decode_nulls() {
        for nullable in ["yes", "YES", "True", "1", " yes "] {
            assert!(decode_nulls(nullable), "{nullable}");
        }
        for not_nullable in ["no", "false", "0", "", "maybe"] {
            assert!(!decode_nulls(not_nullable), "{not_nullable}");
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("say \"hi\"\nthere"), "say ''hi'' there");
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("two\r\nlines"), "two lines");
    }

    #[test]
    fn test_end_tokens() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .class("Customer", "Sales")
            .attribute("Customer", "id", "int", "No", "Yes")
            .attribute("Order", "note", "text", "Yes", "")
            .relationship("places", ("Order", "", "Many"), ("Customer", "id", "One"))
            .relationship("annotates", ("Order", "note", "One"), ("Customer", "", "Many"))
            .build();

        let places = model.relationship(RelationshipId::new(0));
        assert_eq!(end_token(&model, places, End::From), "}o");
        assert_eq!(end_token(&model, places, End::To), "||");

        let annotates = model.relationship(RelationshipId::new(1));
        assert_eq!(end_token(&model, annotates, End::From), "|o");
        assert_eq!(end_token(&model, annotates, End::To), "o{");
    }

    #[test]
    fn test_unresolved_attribute_end_is_optional() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .relationship("self", ("Order", "missing", "One"), ("Order", "", "One"))
            .build();

        let relationship = model.relationship(RelationshipId::new(0));
        assert_eq!(end_token(&model, relationship, End::From), "|o");
    }

    #[test]
    fn test_full_diagram() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .class("Customer", "Sales")
            .attribute("Order", "customer_id", "int", "No", "")
            .attribute("Order", "id", "", "No", "Yes")
            .attribute("Customer", "id", "int", "No", "Yes")
            .relationship(
                "places",
                ("Order", "customer_id", "Many"),
                ("Customer", "id", "One"),
            )
            .build();

        assert_eq!(
            render(&model),
            "erDiagram\n\
             \x20   Order[\"Order\"] {\n\
             \x20       int customer_id\n\
             \x20       _ id PK\n\
             \x20   }\n\
             \x20   Customer[\"Customer\"] {\n\
             \x20       int id PK\n\
             \x20   }\n\
             \x20   Order }|--|| Customer : \"places\"\n"
        );
    }

    #[test]
    fn test_class_without_attributes_renders_empty_block() {
        let model = ModelBuilder::new()
            .domain("Inventory", "")
            .class("Product", "Inventory")
            .build();

        assert_eq!(
            render(&model),
            "erDiagram\n    Product[\"Product\"] {\n    }\n"
        );
    }

    #[test]
    fn test_descriptions_are_optional_and_escaped() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Customer", "Sales")
            .attribute("Customer", "name", "string", "No", "")
            .build();
        let exporter = MermaidExporter::new(RenderConfig::new(true));
        let attribute = model.attribute(AttributeId::new(0));
        assert_eq!(exporter.attribute_line(attribute), "        string name");

        let described = Attribute::new(
            AttributeRecord {
                description: "Full \"legal\"\nname".to_string(),
                ..attribute.record().clone()
            },
            attribute.class().clone(),
        );
        assert_eq!(
            exporter.attribute_line(&described),
            "        string name \"Full ''legal'' name\""
        );
        assert_eq!(
            MermaidExporter::default().attribute_line(&described),
            "        string name"
        );
    }

    #[test]
    fn test_attribute_datatype_and_name_are_escaped() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .attribute("Order", "ship\nto", "varchar\"(10)\"", "No", "")
            .build();

        let line = MermaidExporter::default().attribute_line(model.attribute(AttributeId::new(0)));
        assert_eq!(line, "        varchar''(10)'' ship to");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_key_markers_join_without_spaces() {
        let model = ModelBuilder::new()
            .domain("Sales", "")
            .class("Order", "Sales")
            .attribute("Order", "id", "int", "No", "Yes")
            .build();

        let line = MermaidExporter::default().attribute_line(model.attribute(AttributeId::new(0)));
        assert_eq!(line, "        int id PK");
        assert_eq!(join_markers(&[KeyMarker::Primary, KeyMarker::Unique]), "PK,UK");
    }
}
