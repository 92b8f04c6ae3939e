//! Server endpoint and schema name validation.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Connection settings parsed from `<user>:<password>@<host>:<port>`.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Parse an endpoint string.
    ///
    /// The last `@` separates credentials from the address and the first `:`
    /// of the credentials ends the user name, so passwords may contain both.
    pub fn parse(value: &str) -> Result<Self> {
        let malformed = || {
            Box::new(Error::InvalidServer {
                value: value.to_string(),
            })
        };

        let (credentials, address) = value.rsplit_once('@').ok_or_else(malformed)?;
        let (user, password) = credentials.split_once(':').ok_or_else(malformed)?;
        let (host, port) = address.rsplit_once(':').ok_or_else(malformed)?;

        if user.is_empty() || host.is_empty() {
            return Err(malformed());
        }
        if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let port = port.parse::<u16>().map_err(|e| {
            Box::new(Error::InvalidPort {
                port: port.to_string(),
                source: e,
            })
        })?;

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
        })
    }
}

impl FromStr for ServerConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Never print the password.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.port)
    }
}

/// Check that a schema name only contains `[A-Za-z0-9_]`.
pub fn validate_schema_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(Box::new(Error::InvalidDatabase {
            value: name.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server() {
        let server = ServerConfig::parse("root:secret@127.0.0.1:3306").unwrap();
        assert_eq!(server.user, "root");
        assert_eq!(server.password, "secret");
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 3306);
    }

    #[test]
    fn test_parse_server_empty_password() {
        let server: ServerConfig = "root:@db.local:3307".parse().unwrap();
        assert_eq!(server.password, "");
        assert_eq!(server.host, "db.local");
        assert_eq!(server.port, 3307);
    }

    #[test]
    fn test_password_may_contain_separators() {
        let server = ServerConfig::parse("app:p@ss:word@db:3306").unwrap();
        assert_eq!(server.user, "app");
        assert_eq!(server.password, "p@ss:word");
        assert_eq!(server.host, "db");
    }

    #[test]
    fn test_malformed_servers() {
        for value in [
            "",
            "root@localhost:3306",
            "root:secret@localhost",
            "root:secret@localhost:",
            "root:secret@localhost:33a6",
            "root:secret localhost:3306",
            ":secret@localhost:3306",
            "root:secret@:3306",
        ] {
            let err = ServerConfig::parse(value).unwrap_err();
            assert!(
                matches!(*err, Error::InvalidServer { .. }),
                "{value}: {err:?}"
            );
        }
    }

    #[test]
    fn test_port_out_of_range() {
        let err = ServerConfig::parse("root:secret@localhost:70000").unwrap_err();
        assert!(matches!(*err, Error::InvalidPort { .. }));
    }

    #[test]
    fn test_display_hides_password() {
        let server = ServerConfig::parse("root:secret@localhost:3306").unwrap();
        assert_eq!(server.to_string(), "root@localhost:3306");
        assert!(!format!("{server:?}").contains("secret"));
    }

    #[test]
    fn test_validate_schema_name() {
        assert!(validate_schema_name("shop").is_ok());
        assert!(validate_schema_name("Shop_2024").is_ok());

        for name in ["", "shop-db", "shop.db", "shop db", "`shop`", "商店"] {
            let err = validate_schema_name(name).unwrap_err();
            assert!(matches!(*err, Error::InvalidDatabase { .. }), "{name}");
        }
    }
}
