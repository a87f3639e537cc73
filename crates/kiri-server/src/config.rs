use anyhow::Context as _;
use clap::Parser;
use kiri::{db::Connect, Db};
use std::{net::SocketAddr, path::PathBuf, str::FromStr};

/// Command line and environment options for the server binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = "KIRI_DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "KIRI_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Emit logs as JSON lines
    #[arg(long, env = "KIRI_LOG_JSON")]
    pub log_json: bool,

    /// Upper bound on pooled database connections
    #[arg(long, env = "KIRI_MAX_CONNECTIONS")]
    pub max_connections: Option<usize>,

    /// Field aliases, `table.external=column` or `table.external=first|second`
    #[arg(long, env = "KIRI_FIELD_MAP", value_delimiter = ',')]
    pub field_map: Vec<FieldMap>,

    /// SQL script run on every new connection
    #[arg(long, env = "KIRI_INIT_SQL")]
    pub init_sql: Option<PathBuf>,
}

/// One field alias given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub table: String,
    pub external: String,

    /// Columns to try, in order
    pub candidates: Vec<String>,
}

impl FromStr for FieldMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, rhs) = s
            .split_once('=')
            .ok_or_else(|| format!("expected `table.external=column`, got `{s}`"))?;
        let (table, external) = lhs
            .split_once('.')
            .ok_or_else(|| format!("expected `table.external` before `=`, got `{lhs}`"))?;

        let candidates: Vec<String> = rhs
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        if table.trim().is_empty() || external.trim().is_empty() || candidates.is_empty() {
            return Err(format!("incomplete field mapping `{s}`"));
        }

        Ok(FieldMap {
            table: table.trim().to_string(),
            external: external.trim().to_string(),
            candidates,
        })
    }
}

impl Config {
    /// Opens the database described by this configuration.
    pub async fn connect(&self) -> anyhow::Result<Db> {
        let mut driver = Connect::new(&self.database_url)?;

        if let Some(path) = &self.init_sql {
            let sql = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read init script {}", path.display()))?;
            driver = driver.on_connect(sql);
        }

        let mut builder = Db::builder();

        if let Some(max_connections) = self.max_connections {
            builder.max_connections(max_connections);
        }

        for map in &self.field_map {
            match &map.candidates[..] {
                [column] => builder.map(&map.table, &map.external, column),
                candidates => builder.map_first_of(&map.table, &map.external, candidates),
            };
        }

        let db = builder
            .build(driver)
            .await
            .with_context(|| format!("failed to open {}", self.database_url))?;

        Ok(db)
    }
}
