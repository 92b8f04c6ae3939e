//! Type mapping between MySQL column types and IDL scalar types.

/// IDL scalar types a column can map to.
///
/// This is a format-agnostic representation. Use a `TypeMapper` to spell
/// it for a concrete output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdlType {
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
}

impl IdlType {
    /// Get the IDL scalar name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdlType::Int32 => "int32",
            IdlType::Int64 => "int64",
            IdlType::Float32 => "float32",
            IdlType::Float64 => "float64",
            IdlType::String => "string",
            IdlType::Bytes => "bytes",
        }
    }
}

impl std::fmt::Display for IdlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a MySQL `DATA_TYPE` to its IDL type.
///
/// Lookup is case-insensitive. Unknown types fall back to [`IdlType::String`].
pub fn map_column_type(data_type: &str) -> IdlType {
    match data_type.trim().to_ascii_uppercase().as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" => IdlType::Int32,
        "BIGINT" => IdlType::Int64,
        "FLOAT" | "DECIMAL" => IdlType::Float32,
        "DOUBLE" => IdlType::Float64,
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => IdlType::Bytes,
        // DATE, TIME, YEAR, DATETIME, TIMESTAMP, CHAR, VARCHAR and the TEXT family
        _ => IdlType::String,
    }
}

/// Trait for spelling IDL types in a target format.
pub trait TypeMapper {
    /// The target format name
    fn format(&self) -> &'static str;

    /// Map an IDL type to the format's type keyword
    fn map_type(&self, ty: IdlType) -> &'static str;
}

/// proto3 type mapper
pub struct ProtoTypeMapper;

impl TypeMapper for ProtoTypeMapper {
    fn format(&self) -> &'static str {
        "proto3"
    }

    fn map_type(&self, ty: IdlType) -> &'static str {
        match ty {
            IdlType::Int32 => "int32",
            IdlType::Int64 => "int64",
            IdlType::Float32 => "float",
            IdlType::Float64 => "double",
            IdlType::String => "string",
            IdlType::Bytes => "bytes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        for ty in ["TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER"] {
            assert_eq!(map_column_type(ty), IdlType::Int32, "{ty}");
        }
        assert_eq!(map_column_type("BIGINT"), IdlType::Int64);
    }

    #[test]
    fn test_float_types() {
        assert_eq!(map_column_type("FLOAT"), IdlType::Float32);
        assert_eq!(map_column_type("DECIMAL"), IdlType::Float32);
        assert_eq!(map_column_type("DOUBLE"), IdlType::Float64);
    }

    #[test]
    fn test_string_and_bytes_types() {
        for ty in [
            "DATE",
            "TIME",
            "YEAR",
            "DATETIME",
            "TIMESTAMP",
            "CHAR",
            "VARCHAR",
            "TINYTEXT",
            "TEXT",
            "MEDIUMTEXT",
            "LONGTEXT",
        ] {
            assert_eq!(map_column_type(ty), IdlType::String, "{ty}");
        }
        for ty in ["TINYBLOB", "BLOB", "MEDIUMBLOB", "LONGBLOB"] {
            assert_eq!(map_column_type(ty), IdlType::Bytes, "{ty}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        // information_schema reports DATA_TYPE in lowercase
        assert_eq!(map_column_type("int"), IdlType::Int32);
        assert_eq!(map_column_type("BigInt"), IdlType::Int64);
        assert_eq!(map_column_type("longblob"), IdlType::Bytes);
    }

    #[test]
    fn test_unknown_falls_back_to_string() {
        for ty in ["JSON", "ENUM", "SET", "GEOMETRY", "BIT", "", "not a type"] {
            let mapped = map_column_type(ty);
            assert_eq!(mapped, IdlType::String, "{ty}");
            assert!(!mapped.as_str().is_empty());
        }
    }

    #[test]
    fn test_proto_type_mapper() {
        let mapper = ProtoTypeMapper;

        assert_eq!(mapper.format(), "proto3");
        assert_eq!(mapper.map_type(IdlType::Int32), "int32");
        assert_eq!(mapper.map_type(IdlType::Int64), "int64");
        assert_eq!(mapper.map_type(IdlType::Float32), "float");
        assert_eq!(mapper.map_type(IdlType::Float64), "double");
        assert_eq!(mapper.map_type(IdlType::String), "string");
        assert_eq!(mapper.map_type(IdlType::Bytes), "bytes");
    }
}
