use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use eyre::Result;
use mysql2proto_codegen::DEFAULT_CONCURRENCY;
use mysql2proto_config::{IgnoreRules, ServerConfig, validate_schema_name};
use tracing::info;

use crate::{
    mysql::{ConnectOptions, MysqlSource},
    ops::{self, ConvertOptions},
    reports::{Report, TerminalOutput},
};

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mysql2proto_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "mysql2proto")]
#[command(version)]
#[command(about = "Convert MySQL tables to proto3 messages")]
pub(crate) struct Cli {
    /// Server to read from
    #[arg(short, long, value_name = "USER:PASSWORD@HOST:PORT")]
    pub server: String,

    /// Database (schema) to convert
    #[arg(short, long)]
    pub db: String,

    /// Path to a YAML file listing ignored tables and columns
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Package name written into every generated file
    #[arg(short, long)]
    pub package: Option<String>,

    /// Maximum number of tables converted at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub concurrency: u32,

    /// Connection character set
    #[arg(long, default_value = "utf8mb4")]
    pub charset: String,

    /// Timeout in seconds for connecting and for acquiring a pooled connection
    #[arg(long, default_value_t = 10, value_name = "SECONDS")]
    pub connect_timeout: u64,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        // Everything that can be rejected up front is checked before connecting.
        let server = ServerConfig::parse(&self.server).unwrap_or_exit();
        validate_schema_name(&self.db).unwrap_or_exit();
        let rules = IgnoreRules::load(self.config.as_deref()).unwrap_or_exit();
        info!(rules = rules.len(), "loaded ignore config");

        let source = MysqlSource::connect(
            &server,
            &ConnectOptions {
                charset: self.charset.clone(),
                timeout: Duration::from_secs(self.connect_timeout),
                max_connections: self.concurrency,
            },
        )
        .await?;
        let source = Arc::new(source);

        let report = ops::convert(
            Arc::clone(&source),
            &self.db,
            rules,
            ConvertOptions {
                output_dir: &self.out,
                package: self.package.clone(),
                concurrency: self.concurrency as usize,
                dry_run: self.dry_run,
            },
        )
        .await;
        source.close().await;

        report?.render(&mut TerminalOutput::new());
        Ok(())
    }
}
