//! Tabular input: required columns, typed rows, and the two readers.
//!
//! A DMCAR table is wide and denormalized: one row can describe a domain, a
//! class, an attribute and a relationship at once. [`Table`] checks the header
//! once and stores each row as a fixed set of [`Cell`]s addressed by
//! [`Column`], so marshalling never deals with column names.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::debug;

use dmcar_core::cell::Cell;

use crate::{
    csv,
    error::{Diagnostic, ErrorCode, ParseError},
};

macro_rules! columns {
    ($($variant:ident),+ $(,)?) => {
        /// A required column of the tabular source.
        ///
        /// Header names match the variant names exactly (case-sensitive).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Column {
            $($variant,)+
        }

        impl Column {
            /// Every required column, in canonical order.
            pub const ALL: &'static [Column] = &[$(Column::$variant,)+];

            /// The header name of this column.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Column::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

columns!(
    Namespace,
    Domain,
    DomainLabel,
    DomainDescription,
    ParentDomain,
    Class,
    ClassLabel,
    ClassDescription,
    Attribute,
    AttributeLabel,
    AttributeDescription,
    Sequence,
    DataType,
    Nulls,
    IsPK,
    Relationship,
    RelationshipLabel,
    RelationshipDescription,
    RelationshipType,
    FromNamespace,
    FromClass,
    FromAttribute,
    FromCardinality,
    ToNamespace,
    ToClass,
    ToAttribute,
    ToCardinality,
);

impl Column {
    fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == s)
            .ok_or(())
    }
}

/// One row of the table, with a cell for every required column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Builds a row from `(column, cell)` pairs; unnamed columns are missing.
    pub fn from_cells(cells: impl IntoIterator<Item = (Column, Cell)>) -> Self {
        let mut row = Self {
            cells: vec![Cell::Null; Column::ALL.len()],
        };
        for (column, cell) in cells {
            row.cells[column.position()] = cell;
        }
        row
    }

    /// Returns the cell in `column`.
    pub fn get(&self, column: Column) -> &Cell {
        &self.cells[column.position()]
    }
}

/// Supported serializations of the tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of row objects keyed by column name.
    Json,
}

impl InputFormat {
    /// Picks the format from a file extension (`csv` or `json`, any case).
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.parse().ok()
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(format!("unsupported input format `{other}`")),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// A validated table of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from already typed rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a table from a header and positional records.
    ///
    /// Columns outside the required set are ignored. Records shorter than the
    /// header are padded with missing cells.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] listing every missing required column, or every
    /// record longer than the header.
    pub fn new<H: AsRef<str>>(header: &[H], records: Vec<Vec<Cell>>) -> Result<Self, ParseError> {
        let mapping: Vec<Option<Column>> = header
            .iter()
            .map(|name| name.as_ref().parse().ok())
            .collect();

        let missing: Vec<Diagnostic> = Column::ALL
            .iter()
            .filter(|column| !mapping.contains(&Some(**column)))
            .map(|column| {
                Diagnostic::error(format!("missing required column `{column}`"))
                    .with_code(ErrorCode::E001)
                    .with_help("column names are case-sensitive")
            })
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::new(missing));
        }

        let mut ragged = Vec::new();
        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            if record.len() > header.len() {
                ragged.push(
                    Diagnostic::error(format!(
                        "row has {} fields but the header has {} columns",
                        record.len(),
                        header.len()
                    ))
                    .with_code(ErrorCode::E004)
                    .with_row(idx + 1),
                );
                continue;
            }
            let cells = mapping
                .iter()
                .zip(record)
                .filter_map(|(column, cell)| column.map(|column| (column, cell)));
            rows.push(Row::from_cells(cells));
        }
        if !ragged.is_empty() {
            return Err(ParseError::new(ragged));
        }

        debug!(rows = rows.len(); "Table validated");
        Ok(Self { rows })
    }

    /// Parses `source` in the given format.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the source is malformed or lacks a
    /// required column.
    pub fn parse(source: &str, format: InputFormat) -> Result<Self, ParseError> {
        match format {
            InputFormat::Csv => Self::from_csv(source),
            InputFormat::Json => Self::from_json(source),
        }
    }

    /// Parses CSV text whose first record is the header.
    ///
    /// Every field is text; empty fields are missing values.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed CSV or a missing column.
    pub fn from_csv(source: &str) -> Result<Self, ParseError> {
        let mut records = csv::parse_records(source)?.into_iter();
        let header = records.next().unwrap_or_default();
        let records = records
            .map(|record| {
                record
                    .into_iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Null
                        } else {
                            Cell::Text(field)
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(&header, records)
    }

    /// Parses a JSON array of objects mapping column names to values.
    ///
    /// The header is the union of all keys in first-seen order, so a column
    /// only needs to appear in one object.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed JSON or a missing column.
    pub fn from_json(source: &str) -> Result<Self, ParseError> {
        let objects: Vec<IndexMap<String, Cell>> = serde_json::from_str(source).map_err(|err| {
            Diagnostic::error(format!("invalid JSON table: {err}"))
                .with_code(ErrorCode::E003)
                .with_help("expected an array of objects keyed by column name")
        })?;

        let mut header: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !header.contains(key) {
                    header.push(key.clone());
                }
            }
        }

        let records = objects
            .into_iter()
            .map(|mut object| {
                header
                    .iter()
                    .map(|key| object.swap_remove(key).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self::new(&header, records)
    }

    /// The rows, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
