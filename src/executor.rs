use std::env;

use anyhow::{Context, Error};
use async_trait::async_trait;
use base64::prelude::*;
use snowflake_api::{QueryResult, SnowflakeApi};

use crate::sql;

/// The execution seam between statement generation and the warehouse.
///
/// Invoked at most once per lifecycle operation, with no internal retries or
/// batching; failures propagate to the caller untouched.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs one statement. `bindings` hold the values for the `%s`
    /// placeholders in `sql`, in order.
    async fn execute(&self, sql: &str, bindings: &[String]) -> anyhow::Result<()>;
}

/// Connection settings for the Snowflake executor, loaded from the
/// environment.
#[derive(Clone)]
pub struct SnowflakeConfig {
    pub account: String,
    pub user: String,
    pub role: String,
    pub warehouse: String,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub private_key: String,
}

impl SnowflakeConfig {
    /// Reads `SF_ACCOUNT`, `SF_USER`, `SF_ROLE`, `SF_WAREHOUSE`, the
    /// optional `SF_DATABASE`/`SF_SCHEMA` scope, and exactly one of
    /// `SF_PRIVATE_KEY_BASE64` or `SF_PRIVATE_KEY_PATH`.
    pub fn from_env() -> anyhow::Result<Self> {
        let account = env::var("SF_ACCOUNT").context("SF_ACCOUNT env var not set!")?;
        let user = env::var("SF_USER").context("SF_USER env var not set!")?;
        let role = env::var("SF_ROLE").context("SF_ROLE env var not set!")?;
        let warehouse = env::var("SF_WAREHOUSE").context("SF_WAREHOUSE env var not set!")?;
        let database = env::var("SF_DATABASE").ok();
        let schema = env::var("SF_SCHEMA").ok();
        let private_key_base64 = env::var("SF_PRIVATE_KEY_BASE64");
        let private_key_path = env::var("SF_PRIVATE_KEY_PATH");

        let private_key = match (private_key_base64, private_key_path) {
            (Ok(_), Ok(_)) => Err(Error::msg(
                "Ambiguous: Only one of SF_PRIVATE_KEY_BASE64 and SF_PRIVATE_KEY_PATH can be set!",
            )),
            (Ok(private_key_base64), Err(_)) => {
                let private_key = BASE64_STANDARD
                    .decode(private_key_base64)
                    .context("Failed to decode SF_PRIVATE_KEY_BASE64")?;
                Ok(String::from_utf8(private_key).context("SF_PRIVATE_KEY_BASE64 is not valid UTF-8")?)
            }
            (Err(_), Ok(private_key_path)) => std::fs::read_to_string(&private_key_path)
                .with_context(|| format!("Failed to read private key from {}", private_key_path)),
            (Err(_), Err(_)) => Err(Error::msg("SF_PRIVATE_KEY_BASE64 or SF_PRIVATE_KEY_PATH not set!")),
        }?;

        Ok(SnowflakeConfig {
            account,
            user,
            role,
            warehouse,
            database,
            schema,
            private_key,
        })
    }
}

/// [`QueryExecutor`] backed by the Snowflake SQL API with key-pair auth.
pub struct SnowflakeExecutor {
    api: SnowflakeApi,
}

impl SnowflakeExecutor {
    pub fn connect(config: &SnowflakeConfig) -> anyhow::Result<Self> {
        let api = SnowflakeApi::with_certificate_auth(
            &config.account,
            Some(&config.warehouse),
            config.database.as_deref(),
            config.schema.as_deref(),
            &config.user,
            Some(&config.role),
            &config.private_key,
        )?;
        Ok(SnowflakeExecutor { api })
    }
}

#[async_trait]
impl QueryExecutor for SnowflakeExecutor {
    async fn execute(&self, statement: &str, bindings: &[String]) -> anyhow::Result<()> {
        // The SQL API takes finished text, so substitution happens here
        // rather than server-side.
        let bound = sql::bind_inline(statement, bindings)?;
        tracing::debug!("exec: {bound}");

        match self.api.exec(&bound).await? {
            QueryResult::Json(json) => tracing::debug!("exec result: {}", json.value),
            QueryResult::Arrow(batches) => tracing::debug!("exec result: {} arrow batches", batches.len()),
            QueryResult::Empty => {}
        }

        Ok(())
    }
}
