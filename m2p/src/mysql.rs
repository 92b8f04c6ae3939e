//! `information_schema` access over sqlx.

use std::time::Duration;

use async_trait::async_trait;
use eyre::{Context, Result, eyre};
use mysql2proto_codegen::SchemaSource;
use mysql2proto_config::ServerConfig;
use mysql2proto_core::{ColumnDescriptor, TableDescriptor, TableKind};
use sqlx::{
    FromRow, MySqlPool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};
use tracing::debug;

/// Connection tuning for [`MysqlSource::connect`].
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub charset: String,
    /// Bounds both the initial connect and each pool acquire.
    pub timeout: Duration,
    /// Upper bound on pooled connections; match the admission capacity.
    pub max_connections: u32,
}

#[derive(FromRow)]
struct TableRow {
    table_name: String,
    table_type: String,
}

#[derive(FromRow)]
struct ColumnRow {
    table_name: String,
    column_name: String,
    ordinal_position: u64,
    data_type: String,
}

/// Reads schema metadata from a MySQL server's `information_schema`.
pub struct MysqlSource {
    pool: MySqlPool,
}

impl MysqlSource {
    pub async fn connect(server: &ServerConfig, opts: &ConnectOptions) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&server.host)
            .port(server.port)
            .username(&server.user)
            .password(&server.password)
            .database("information_schema")
            .charset(&opts.charset);

        let connect = MySqlPoolOptions::new()
            .max_connections(opts.max_connections.max(1))
            .acquire_timeout(opts.timeout)
            .connect_with(options);
        let pool = within(opts.timeout, connect)
            .await
            .and_then(|pool| pool.map_err(Into::into))
            .wrap_err_with(|| format!("failed to connect to `{}`", server))?;

        debug!(server = %server, "connected");
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Run `fut`, failing once `timeout` has elapsed.
async fn within<F: Future>(timeout: Duration, fut: F) -> Result<F::Output> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| eyre!("timed out after {}s", timeout.as_secs_f64()))
}

#[async_trait]
impl SchemaSource for MysqlSource {
    async fn schema_exists(&self, schema: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM `SCHEMATA` WHERE `SCHEMA_NAME` = ?",
        )
        .bind(schema)
        .fetch_one(&self.pool)
        .await
        .wrap_err("failed to query SCHEMATA")?;

        Ok(count > 0)
    }

    async fn tables(&self, schema: &str) -> Result<Vec<TableDescriptor>> {
        let rows: Vec<TableRow> = sqlx::query_as(
            "SELECT CAST(`TABLE_NAME` AS CHAR) AS table_name, \
                    CAST(`TABLE_TYPE` AS CHAR) AS table_type \
             FROM `TABLES` WHERE `TABLE_SCHEMA` = ? \
             ORDER BY `TABLE_NAME` ASC",
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await
        .wrap_err("failed to query TABLES")?;

        Ok(rows
            .into_iter()
            .map(|row| TableDescriptor::new(row.table_name, TableKind::from(row.table_type.as_str())))
            .collect())
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<ColumnRow> = sqlx::query_as(
            "SELECT CAST(`TABLE_NAME` AS CHAR) AS table_name, \
                    CAST(`COLUMN_NAME` AS CHAR) AS column_name, \
                    CAST(`ORDINAL_POSITION` AS UNSIGNED) AS ordinal_position, \
                    CAST(`DATA_TYPE` AS CHAR) AS data_type \
             FROM `COLUMNS` WHERE `TABLE_SCHEMA` = ? AND `TABLE_NAME` = ? \
             ORDER BY `ORDINAL_POSITION` ASC",
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&self.pool)
        .await
        .wrap_err("failed to query COLUMNS")?;

        rows.into_iter()
            .map(|row| {
                let ordinal = u32::try_from(row.ordinal_position).wrap_err_with(|| {
                    format!("column `{}` has an out of range position", row.column_name)
                })?;
                Ok(ColumnDescriptor::new(
                    row.table_name,
                    row.column_name,
                    ordinal,
                    row.data_type,
                ))
            })
            .collect()
    }
}
