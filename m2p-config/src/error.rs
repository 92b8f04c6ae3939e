use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(mysql2proto::io), help("check the path passed to --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse ignore config")]
    #[diagnostic(
        code(mysql2proto::parse_error),
        help("expected `ignores: [{{ table: <name>, columns: [<column>, ...] }}]`")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("server `{value}` is malformed")]
    #[diagnostic(
        code(mysql2proto::invalid_server),
        help("expected <user>:<password>@<host>:<port>")
    )]
    InvalidServer { value: String },

    #[error("server port `{port}` is not a valid port number")]
    #[diagnostic(code(mysql2proto::invalid_port))]
    InvalidPort {
        port: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("database `{value}` is malformed")]
    #[diagnostic(
        code(mysql2proto::invalid_database),
        help("use only ASCII letters, digits and underscores")
    )]
    InvalidDatabase { value: String },
}

impl Error {
    /// Create a parse error from a YAML error with source context
    pub fn parse(source: serde_yaml::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 1)));
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }
}
