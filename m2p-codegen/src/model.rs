//! Render-ready definition model.

use std::fmt;

use mysql2proto_core::IdlType;

/// One message field produced from a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Column name, kept as-is.
    pub name: String,
    pub ty: IdlType,
    /// 1-based position after filtering.
    pub number: u32,
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.name, self.ty, self.number)
    }
}

/// A converted table: PascalCase message name and its ordered fields.
///
/// Field numbers are always `1..=fields.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl TableDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for TableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", field)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let def = TableDefinition {
            name: "Orders".to_string(),
            fields: vec![
                FieldDefinition {
                    name: "id".to_string(),
                    ty: IdlType::Int32,
                    number: 1,
                },
                FieldDefinition {
                    name: "total".to_string(),
                    ty: IdlType::Float32,
                    number: 2,
                },
            ],
        };

        assert_eq!(def.to_string(), "Orders [id:int32#1, total:float32#2]");
        assert_eq!(def.field("total").map(|f| f.number), Some(2));
        assert!(def.field("note").is_none());
    }
}
