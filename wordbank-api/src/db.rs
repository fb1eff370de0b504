//! Database Connection Pool Module
//!
//! This module provides MySQL connection pooling using sqlx and the
//! `DbClient` wrapper whose methods call the Wordbank stored procedures.
//!
//! This module does NOT write ad-hoc SQL. Every operation is a `CALL` to a
//! procedure from the [`Procedure`] catalogue; the database owns all
//! business rules (uniqueness, ownership, practice scheduling).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, MySql, Row, TypeInfo, ValueRef};
use wordbank_core::{
    FromResultRow, GatewayError, GatewayResult, Procedure, ProcedureCall, ProcedureGateway,
    ResultRow, SqlValue, Timestamp, UserId, VocabEntry, VocabId, COL_STATUS, COL_USER_ID,
    COL_VOCAB_ID,
};

use crate::error::{ApiError, ApiResult};
use crate::types::{AddUserRequest, AddVocabRequest};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// Full connection URL; overrides the individual fields when set
    pub url: Option<String>,
    /// MySQL host
    pub host: String,
    /// MySQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: u32,
    /// How long a request waits for a pooled connection
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3306,
            dbname: "wordbank".to_string(),
            user: "root".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_size", &self.max_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("WORDBANK_DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            host: std::env::var("WORDBANK_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("WORDBANK_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("WORDBANK_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("WORDBANK_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("WORDBANK_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("WORDBANK_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_size),
            timeout: std::env::var("WORDBANK_DB_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Driver connect options for this configuration.
    pub fn connect_options(&self) -> ApiResult<MySqlConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<MySqlConnectOptions>()
                .map_err(|e| ApiError::internal_error(format!("Invalid database URL: {}", e)));
        }

        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password))
    }

    /// Create a connection pool from this configuration.
    ///
    /// Connections are opened lazily on first use. Must be called from
    /// within a Tokio runtime.
    pub fn create_pool(&self) -> ApiResult<MySqlPool> {
        let options = self.connect_options()?;

        Ok(MySqlPoolOptions::new()
            .max_connections(self.max_size)
            .acquire_timeout(self.timeout)
            .connect_lazy_with(options))
    }
}

// ============================================================================
// MYSQL GATEWAY
// ============================================================================

/// [`ProcedureGateway`] backed by a shared sqlx MySQL pool.
#[derive(Clone)]
pub struct MySqlGateway {
    pool: MySqlPool,
}

impl MySqlGateway {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcedureGateway for MySqlGateway {
    async fn call(&self, call: &ProcedureCall) -> GatewayResult<Vec<ResultRow>> {
        let params = call.ordered_params()?;
        let statement = call.statement();

        let query = params
            .into_iter()
            .fold(sqlx::query(&statement), bind_value);

        let rows = query.fetch_all(&self.pool).await.map_err(driver_error)?;
        rows.iter().map(decode_row).collect()
    }

    async fn ping(&self) -> GatewayResult<()> {
        let mut conn = self.pool.acquire().await.map_err(driver_error)?;
        conn.ping().await.map_err(driver_error)
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &'q SqlValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Int(value) => query.bind(*value),
        SqlValue::Bool(value) => query.bind(*value),
        SqlValue::Text(value) => query.bind(value.as_str()),
        SqlValue::Timestamp(value) => query.bind(*value),
    }
}

/// Keep the server's own message for database errors; everything else
/// (I/O, pool timeout, protocol) uses the driver's description.
fn driver_error(err: sqlx::Error) -> GatewayError {
    match &err {
        sqlx::Error::Database(db_err) => GatewayError::database(db_err.message()),
        _ => GatewayError::database(err.to_string()),
    }
}

/// How a result column is read, chosen from the driver's type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    /// `BOOLEAN`, which is how the driver names `TINYINT(1)`
    Bool,
    Signed,
    Unsigned,
    Timestamp,
    Text,
}

impl ColumnKind {
    fn from_type_name(type_name: &str) -> Option<Self> {
        match type_name {
            "BOOLEAN" => Some(ColumnKind::Bool),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                Some(ColumnKind::Signed)
            }
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => Some(ColumnKind::Unsigned),
            "DATETIME" | "TIMESTAMP" => Some(ColumnKind::Timestamp),
            "VARCHAR" | "CHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" => {
                Some(ColumnKind::Text)
            }
            _ => None,
        }
    }
}

fn unsupported_column(name: &str, type_name: &str) -> GatewayError {
    GatewayError::database(format!(
        "Column '{}' has unsupported type {}",
        name, type_name
    ))
}

/// `BIGINT UNSIGNED` (e.g. `LAST_INSERT_ID()`) narrowed into the signed
/// value space every row accessor works in.
fn unsigned_value(name: &str, value: u64) -> GatewayResult<SqlValue> {
    i64::try_from(value).map(SqlValue::Int).map_err(|_| {
        GatewayError::database(format!("Column '{}' value {} exceeds i64", name, value))
    })
}

fn decode_row(row: &MySqlRow) -> GatewayResult<ResultRow> {
    let mut decoded = ResultRow::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.name(), column.type_info().name())?;
        decoded.push(column.name(), value);
    }
    Ok(decoded)
}

fn decode_column(
    row: &MySqlRow,
    index: usize,
    name: &str,
    type_name: &str,
) -> GatewayResult<SqlValue> {
    if row.try_get_raw(index).map_err(driver_error)?.is_null() {
        return Ok(SqlValue::Null);
    }

    let kind = ColumnKind::from_type_name(type_name)
        .ok_or_else(|| unsupported_column(name, type_name))?;

    match kind {
        ColumnKind::Bool => Ok(SqlValue::Bool(row.try_get(index).map_err(driver_error)?)),
        ColumnKind::Signed => Ok(SqlValue::Int(row.try_get(index).map_err(driver_error)?)),
        ColumnKind::Unsigned => unsigned_value(name, row.try_get(index).map_err(driver_error)?),
        ColumnKind::Timestamp => Ok(SqlValue::Timestamp(
            row.try_get::<Timestamp, _>(index).map_err(driver_error)?,
        )),
        ColumnKind::Text => Ok(SqlValue::Text(row.try_get(index).map_err(driver_error)?)),
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a [`ProcedureGateway`] and provides one
/// method per stored procedure, decoding results by column name.
#[derive(Clone)]
pub struct DbClient {
    gateway: Arc<dyn ProcedureGateway>,
}

impl fmt::Debug for DbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbClient").finish_non_exhaustive()
    }
}

impl DbClient {
    /// Create a new database client over the given gateway.
    pub fn new(gateway: Arc<dyn ProcedureGateway>) -> Self {
        Self { gateway }
    }

    /// Create a new MySQL-backed database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(Arc::new(MySqlGateway::new(pool))))
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> ApiResult<()> {
        self.gateway.ping().await.map_err(ApiError::from)
    }

    async fn execute(&self, call: ProcedureCall) -> ApiResult<Vec<ResultRow>> {
        tracing::debug!(procedure = %call.procedure(), "Calling stored procedure");
        self.gateway.call(&call).await.map_err(ApiError::from)
    }

    async fn execute_first(&self, call: ProcedureCall) -> ApiResult<Option<ResultRow>> {
        Ok(self.execute(call).await?.into_iter().next())
    }

    fn decode_all<T: FromResultRow>(rows: &[ResultRow]) -> ApiResult<Vec<T>> {
        rows.iter()
            .map(|row| T::from_row(row).map_err(ApiError::from))
            .collect()
    }

    // ========================================================================
    // USER OPERATIONS
    // ========================================================================

    /// Add a user by calling AddUser.
    ///
    /// `None` when the procedure returned no row, e.g. a rejected duplicate.
    pub async fn user_add(&self, req: &AddUserRequest) -> ApiResult<Option<UserId>> {
        let call = ProcedureCall::new(Procedure::AddUser)
            .bind("firstName", req.first_name.as_deref())
            .bind("lastName", req.last_name.as_deref())
            .bind("userName", req.user_name.as_deref());

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(UserId::new(row.scalar_i32(COL_USER_ID)?))),
            None => Ok(None),
        }
    }

    /// Look up a user id by calling GetUserIdByUserName.
    pub async fn user_id_by_name(&self, user_name: &str) -> ApiResult<Option<UserId>> {
        let call = ProcedureCall::new(Procedure::GetUserIdByUserName).bind("userName", user_name);

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(UserId::new(row.scalar_i32(COL_USER_ID)?))),
            None => Ok(None),
        }
    }

    /// Delete a user by calling DeleteUser, returning its status message.
    pub async fn user_delete(&self, user_id: UserId) -> ApiResult<Option<String>> {
        let call = ProcedureCall::new(Procedure::DeleteUser).bind("userId", user_id);

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(row.scalar_string(COL_STATUS)?)),
            None => Ok(None),
        }
    }

    // ========================================================================
    // VOCABULARY OPERATIONS
    // ========================================================================

    /// Add a vocabulary pair by calling AddVocabulary.
    pub async fn vocab_add(&self, req: &AddVocabRequest) -> ApiResult<Option<VocabId>> {
        let call = ProcedureCall::new(Procedure::AddVocabulary)
            .bind("userID", req.user_id)
            .bind("knownWord", req.known_word.as_deref())
            .bind("targetWord", req.target_word.as_deref());

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(VocabId::new(row.scalar_i32(COL_VOCAB_ID)?))),
            None => Ok(None),
        }
    }

    /// List every vocabulary entry of a user by calling GetAllVocabulary.
    pub async fn vocab_list_all(&self, user_id: UserId) -> ApiResult<Vec<VocabEntry>> {
        let call = ProcedureCall::new(Procedure::GetAllVocabulary).bind("userID", user_id);
        let rows = self.execute(call).await?;
        Self::decode_all(&rows)
    }

    /// Get one vocabulary entry by calling GetVocabularyByID.
    pub async fn vocab_get(
        &self,
        user_id: UserId,
        vocab_id: VocabId,
    ) -> ApiResult<Option<VocabEntry>> {
        let call = ProcedureCall::new(Procedure::GetVocabularyById)
            .bind("userID", user_id)
            .bind("vocabID", vocab_id);

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(VocabEntry::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// List learnt or not-yet-learnt entries by calling GetKnownVocabulary
    /// or GetUnknownVocabulary.
    pub async fn vocab_list_by_learnt(
        &self,
        user_id: UserId,
        learnt: bool,
    ) -> ApiResult<Vec<VocabEntry>> {
        let call = ProcedureCall::new(Procedure::for_learnt(learnt)).bind("userID", user_id);
        let rows = self.execute(call).await?;
        Self::decode_all(&rows)
    }

    /// Delete a vocabulary entry by calling DeleteVocabulary, returning its
    /// status message.
    pub async fn vocab_delete(
        &self,
        user_id: UserId,
        vocab_id: VocabId,
    ) -> ApiResult<Option<String>> {
        let call = ProcedureCall::new(Procedure::DeleteVocabulary)
            .bind("userID", user_id)
            .bind("vocabID", vocab_id);

        match self.execute_first(call).await? {
            Some(row) => Ok(Some(row.scalar_string(COL_STATUS)?)),
            None => Ok(None),
        }
    }
}
