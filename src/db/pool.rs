//! Postgres connection pool

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::config::Config;
use crate::error::Result;

/// Connect to the database named by `DATABASE_URL`.
///
/// Production requires TLS but, like the hosted Postgres setups this runs on,
/// does not verify the server certificate.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let url = config.database_url.as_deref().unwrap_or_default();

    let mut options = PgConnectOptions::from_str(url)?;
    if config.production {
        options = options.ssl_mode(PgSslMode::Require);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Connection has been established successfully");
    Ok(pool)
}
