//! Schema metadata records read from `information_schema`.

use std::fmt;

/// Kind of a table as reported by `TABLES.TABLE_TYPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKind {
    /// `BASE TABLE`
    BaseTable,
    /// `VIEW`
    View,
    /// Anything else (e.g. `SYSTEM VIEW`), kept verbatim.
    Other(String),
}

impl TableKind {
    /// Get the `TABLE_TYPE` string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            TableKind::BaseTable => "BASE TABLE",
            TableKind::View => "VIEW",
            TableKind::Other(kind) => kind,
        }
    }

    /// Whether tables of this kind can be converted into a message.
    pub fn is_convertible(&self) -> bool {
        matches!(self, TableKind::BaseTable)
    }
}

impl From<&str> for TableKind {
    fn from(s: &str) -> Self {
        match s {
            "BASE TABLE" => TableKind::BaseTable,
            "VIEW" => TableKind::View,
            other => TableKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table of the target schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    pub kind: TableKind,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a `BASE TABLE`.
    pub fn base(name: impl Into<String>) -> Self {
        Self::new(name, TableKind::BaseTable)
    }

    /// Shorthand for a `VIEW`.
    pub fn view(name: impl Into<String>) -> Self {
        Self::new(name, TableKind::View)
    }
}

/// A column of a table, in `ORDINAL_POSITION` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub table: String,
    pub name: String,
    pub ordinal: u32,
    /// Raw `DATA_TYPE`, e.g. `int` or `varchar`.
    pub data_type: String,
}

impl ColumnDescriptor {
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        ordinal: u32,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            ordinal,
            data_type: data_type.into(),
        }
    }
}
