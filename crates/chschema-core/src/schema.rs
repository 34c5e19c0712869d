use std::collections::HashMap;

use serde::Serialize;

use crate::naming::TableName;

/// Scalar type tags rendered as plain attributes. Any other kind renders as a
/// foreign key.
pub const SCALAR_KINDS: [&str; 8] = [
    "String",
    "Boolean",
    "Json",
    "Integer",
    "Long",
    "DateTime",
    "Decimal",
    "DateTimeOffset",
];

/// Kind of an output column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Scalar(String),
    Reference(TableName),
}

impl ColumnKind {
    /// Text of the kind as it appears in the report.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnKind::Scalar(tag) => tag,
            ColumnKind::Reference(target) => target.as_str(),
        }
    }

    /// Whether the report renders this kind as a plain attribute.
    pub fn is_plain(&self) -> bool {
        match self {
            ColumnKind::Scalar(tag) => SCALAR_KINDS.contains(&tag.as_str()),
            ColumnKind::Reference(_) => false,
        }
    }
}

/// Column of an output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn scalar(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Scalar(tag.into()),
        }
    }

    pub fn reference(name: impl Into<String>, target: TableName) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Reference(target),
        }
    }
}

/// Table of the normalized schema with columns in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: TableName,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: TableName) -> Self {
        Self {
            name,
            columns: Vec::new(),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    /// Append a column unless one with the same name exists. Returns whether
    /// the column was added.
    pub fn push_unique(&mut self, column: Column) -> bool {
        if self.has_column(&column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// Columns ordered by `(name, kind)` using ordinal comparison.
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.kind.as_str().cmp(right.kind.as_str()))
        });
        columns
    }
}

/// Mapping from table name to table, preserving insertion order of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaGraph {
    tables: Vec<Table>,
    index: HashMap<TableName, usize>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, name: &TableName) -> bool {
        self.index.contains_key(name)
    }

    pub fn table(&self, name: &TableName) -> Option<&Table> {
        self.index.get(name).and_then(|&idx| self.tables.get(idx))
    }

    pub fn table_mut(&mut self, name: &TableName) -> Option<&mut Table> {
        let idx = self.index.get(name).copied()?;
        self.tables.get_mut(idx)
    }

    /// Return the named table, inserting an empty one if absent.
    pub fn ensure_table(&mut self, name: &TableName) -> &mut Table {
        let existing = self.index.get(name).copied();
        let idx = match existing {
            Some(idx) => idx,
            None => self.insert(Table::new(name.clone())),
        };
        &mut self.tables[idx]
    }

    /// Insert a table seeded with `columns`. Returns `false` and leaves the
    /// graph untouched when the name is already present.
    pub fn insert_table(&mut self, name: TableName, columns: Vec<Column>) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.insert(Table { name, columns });
        true
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Tables ordered by name using ordinal comparison.
    pub fn sorted_tables(&self) -> Vec<&Table> {
        let mut tables: Vec<&Table> = self.tables.iter().collect();
        tables.sort_by(|left, right| left.name.cmp(&right.name));
        tables
    }

    fn insert(&mut self, table: Table) -> usize {
        let idx = self.tables.len();
        self.index.insert(table.name.clone(), idx);
        self.tables.push(table);
        idx
    }
}
