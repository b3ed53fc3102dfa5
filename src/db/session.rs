use std::path::Path;

use oracle::{Connection, InitParams, Row};

use crate::{
    db::{DbError, Record},
    infra::config::OracleConfig,
};

/// An open Oracle session. Dropping it closes the connection without commit.
#[derive(Debug)]
pub struct OracleSession {
    conn: Connection,
    database: String,
}

impl OracleSession {
    /// Opens a session with the credentials and service from `config`.
    ///
    /// Loading the client from `client_lib_dir` fails with
    /// [`DbError::ClientInit`]. Any other driver failure while connecting,
    /// including a client library missing from the default search path, is
    /// [`DbError::Connect`].
    pub fn connect(config: &OracleConfig) -> Result<Self, DbError> {
        validate(config)?;

        if let Some(dir) = &config.client_lib_dir {
            init_client(dir)?;
        }

        let database = config.display_target();
        tracing::info!(database = %database, "connecting to oracle");

        let conn = Connection::connect(&config.login, &config.password, config.connect_string())
            .map_err(|source| DbError::Connect {
                database: database.clone(),
                source,
            })?;

        tracing::debug!(database = %database, "oracle session opened");
        Ok(Self { conn, database })
    }

    pub fn query(&self, sql: &str) -> Result<Vec<Record>, DbError> {
        tracing::debug!(sql, "running query");

        let rows = self
            .conn
            .query(sql, &[])
            .map_err(|source| DbError::Execute { source })?;

        let mut records = Vec::new();
        for row_result in rows {
            let row = row_result.map_err(|source| DbError::Execute { source })?;
            records.push(record_from_row(&row)?);
        }

        tracing::debug!(rows = records.len(), "query finished");
        Ok(records)
    }

    pub fn query_one(&self, sql: &str) -> Result<Option<Record>, DbError> {
        Ok(self.query(sql)?.into_iter().next())
    }

    /// Executes a DML/DDL statement and returns the affected row count.
    /// Nothing is committed until [`OracleSession::disconnect`] is asked to.
    pub fn execute(&self, sql: &str) -> Result<u64, DbError> {
        tracing::debug!(sql, "executing statement");

        let statement = self
            .conn
            .execute(sql, &[])
            .map_err(|source| DbError::Execute { source })?;

        statement
            .row_count()
            .map_err(|source| DbError::Execute { source })
    }

    pub fn disconnect(self, commit: bool) -> Result<(), DbError> {
        let disconnect_error = |source| DbError::Disconnect {
            database: self.database.clone(),
            source,
        };

        if commit {
            self.conn.commit().map_err(disconnect_error)?;
        }
        self.conn.close().map_err(disconnect_error)?;

        tracing::info!(database = %self.database, commit, "oracle session closed");
        Ok(())
    }
}

fn validate(config: &OracleConfig) -> Result<(), DbError> {
    if config.host.is_empty() {
        return Err(DbError::InvalidConfig("host cannot be empty"));
    }
    if config.service.is_empty() {
        return Err(DbError::InvalidConfig("service cannot be empty"));
    }
    if config.port == 0 {
        return Err(DbError::InvalidConfig("port must be greater than 0"));
    }
    if config.login.is_empty() {
        return Err(DbError::InvalidConfig("login cannot be empty"));
    }
    Ok(())
}

fn init_client(dir: &Path) -> Result<(), DbError> {
    let client_init_error = |source| DbError::ClientInit {
        dir: dir.to_path_buf(),
        source,
    };

    let mut params = InitParams::new();
    params
        .oracle_client_lib_dir(dir)
        .map_err(client_init_error)?;

    // `false` means an earlier call already initialized the client.
    let fresh = params.init().map_err(client_init_error)?;
    tracing::debug!(dir = %dir.display(), fresh, "oracle client initialized");
    Ok(())
}

fn record_from_row(row: &Row) -> Result<Record, DbError> {
    let mut columns = Vec::new();
    for (index, info) in row.column_info().iter().enumerate() {
        let value: Option<String> = row
            .get(index)
            .map_err(|source| DbError::Execute { source })?;
        columns.push((info.name().to_owned(), value));
    }

    Ok(Record::from_columns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OracleConfig {
        OracleConfig {
            host: "127.0.0.1".to_owned(),
            port: 1,
            service: "NOPE".to_owned(),
            login: "scott".to_owned(),
            password: "tiger".to_owned(),
            client_lib_dir: None,
            connect_timeout_secs: Some(2),
        }
    }

    #[test]
    fn rejects_empty_host_before_touching_the_driver() {
        let error = OracleSession::connect(&OracleConfig {
            host: String::new(),
            ..config()
        })
        .expect_err("empty host must fail");

        assert!(matches!(error, DbError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_port() {
        let error = OracleSession::connect(&OracleConfig { port: 0, ..config() })
            .expect_err("zero port must fail");

        assert!(matches!(error, DbError::InvalidConfig(_)));
    }

    #[test]
    fn unreachable_listener_is_a_connect_error() {
        let error = OracleSession::connect(&config()).expect_err("nothing listens on port 1");

        match error {
            DbError::Connect { database, .. } => assert_eq!(database, "scott@127.0.0.1/NOPE"),
            other => panic!("expected connect error, got {other:?}"),
        }
    }
}
