/// Database Module
///
/// Owns the single MySQL session used by the seeding pipeline: connect,
/// set the session charset, run the one INSERT, and read the outcome
/// counters back. The underlying connection is closed when the [`Session`]
/// is dropped, on every exit path.
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use tracing::{info, warn};

use crate::config::MysqlConfig;
use crate::core::{Result, SeedError};

/// The one statement this tool executes.
const INSERT_USER_SQL: &str = "INSERT INTO users (name, email, age) VALUES (?, ?, ?)";

/// The demo row seeded into the `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewUser {
    /// The fixed demo row: John Doe, 25, john@example.com.
    pub fn sample() -> Self {
        NewUser {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            age: 25,
        }
    }
}

/// Counters reported by the server after the INSERT.
///
/// Valid immediately after [`Session::insert_user`] returns; not persisted
/// anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Rows changed by the statement (expected: 1)
    pub affected_rows: u64,
    /// Server-assigned auto-increment id, 0 when the table has none
    pub last_insert_id: u64,
}

/// One live, exclusively owned session to a MySQL server.
///
/// Single-threaded and blocking throughout. Dropping the session closes
/// the connection, so failure paths cannot leak the handle.
#[derive(Debug)]
pub struct Session {
    conn: Conn,
}

impl Session {
    /// Establishes a session using validated connection parameters.
    ///
    /// The configuration must already have passed
    /// [`MysqlConfig::validate`]; this function re-checks it so that no
    /// connect is ever attempted with blank fields.
    pub fn connect(config: &MysqlConfig) -> Result<Self> {
        config.validate()?;

        info!(
            host = %config.host,
            port = config.port(),
            database = %config.database,
            user = %config.username,
            "connecting to MySQL"
        );

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.clone()))
            .tcp_port(config.port())
            .user(Some(config.username.clone()))
            .pass(Some(config.password.clone()))
            .db_name(Some(config.database.clone()));

        let conn = Conn::new(opts).map_err(SeedError::Connection)?;
        Ok(Session { conn })
    }

    /// Switches the session text encoding to UTF-8.
    ///
    /// Later statements carry UTF-8 text, so a failure here matters, but
    /// it is not fatal: the outcome is logged instead of aborting the run.
    pub fn set_utf8(&mut self) {
        match self.conn.query_drop("SET NAMES utf8mb4") {
            Ok(()) => info!("session charset set to utf8mb4"),
            Err(e) => warn!("failed to set session charset to utf8mb4: {}", e),
        }
    }

    /// Inserts the given row into the `users` table and reads back the
    /// affected-row count and last insert id.
    ///
    /// The `users` table is an external precondition; when it is missing
    /// the server rejects the statement and this returns a query error.
    /// Repeated calls insert duplicate rows with increasing ids, the
    /// operation is deliberately not idempotent.
    pub fn insert_user(&mut self, user: &NewUser) -> Result<InsertOutcome> {
        self.conn
            .exec_drop(
                INSERT_USER_SQL,
                (user.name.as_str(), user.email.as_str(), user.age),
            )
            .map_err(SeedError::Query)?;

        Ok(InsertOutcome {
            affected_rows: self.conn.affected_rows(),
            last_insert_id: self.conn.last_insert_id(),
        })
    }
}
