//! Integration tests that need a live MySQL server.
//!
//! These are `#[ignore]`d by default; run them explicitly with
//! `cargo test -- --ignored` against a **disposable** database described
//! by the usual environment variables (MYSQL_HOST, MYSQL_PORT,
//! MYSQL_USER, MYSQL_PASSWORD, MYSQL_DATABASE). The tests create and
//! drop the `users` table in that database.

use assert_cmd::Command;
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};
use std::process::Output;

struct LiveServer {
    host: String,
    port: u16,
    user: String,
    password: String,
    database: String,
}

impl LiveServer {
    /// Reads the target server from the environment, panicking with
    /// guidance when it is not configured. Only ignored tests get here.
    fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name).unwrap_or_else(|_| {
                panic!("{} must be set to run the live-server tests", name)
            })
        };
        LiveServer {
            host: var("MYSQL_HOST"),
            port: std::env::var("MYSQL_PORT")
                .ok()
                .map(|p| p.parse().expect("MYSQL_PORT must be a port number"))
                .unwrap_or(3306),
            user: var("MYSQL_USER"),
            password: std::env::var("MYSQL_PASSWORD").unwrap_or_default(),
            database: var("MYSQL_DATABASE"),
        }
    }

    /// Direct connection for schema setup and row-count checks.
    fn admin_conn(&self) -> Conn {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(Some(self.database.clone()));
        Conn::new(opts).expect("failed to connect to the live test server")
    }

    /// Runs the userseed binary against this server, configured purely
    /// through the environment.
    fn run_seed(&self) -> Output {
        Command::cargo_bin("userseed")
            .unwrap()
            .env("MYSQL_HOST", &self.host)
            .env("MYSQL_PORT", self.port.to_string())
            .env("MYSQL_USER", &self.user)
            .env("MYSQL_PASSWORD", &self.password)
            .env("MYSQL_DATABASE", &self.database)
            .output()
            .expect("failed to run userseed")
    }
}

/// Pulls the numeric tail out of a "Last insert id: N" stdout line.
fn parse_insert_id(stdout: &str) -> u64 {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Last insert id: "))
        .unwrap_or_else(|| panic!("no insert id line in stdout: {}", stdout))
        .trim()
        .parse()
        .expect("insert id is not a number")
}

#[test]
#[ignore]
fn insert_fails_when_users_table_is_missing() {
    let server = LiveServer::from_env();
    let mut conn = server.admin_conn();
    conn.query_drop("DROP TABLE IF EXISTS users").unwrap();

    let output = server.run_seed();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("query error"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty(), "stdout not empty: {}", stdout);
}

#[test]
#[ignore]
fn repeated_runs_insert_one_row_each_with_increasing_ids() {
    let server = LiveServer::from_env();
    let mut conn = server.admin_conn();
    conn.query_drop("DROP TABLE IF EXISTS users").unwrap();
    conn.query_drop(
        "CREATE TABLE users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            age INT NOT NULL
        )",
    )
    .unwrap();

    let first = server.run_seed();
    assert_eq!(first.status.code(), Some(0));
    let first_out = String::from_utf8_lossy(&first.stdout).to_string();
    assert!(
        first_out.contains("Inserted 1 row(s)"),
        "stdout: {}",
        first_out
    );

    let second = server.run_seed();
    assert_eq!(second.status.code(), Some(0));
    let second_out = String::from_utf8_lossy(&second.stdout).to_string();
    assert!(
        second_out.contains("Inserted 1 row(s)"),
        "stdout: {}",
        second_out
    );

    // Not idempotent: same literal content, strictly increasing ids.
    let first_id = parse_insert_id(&first_out);
    let second_id = parse_insert_id(&second_out);
    assert!(
        second_id > first_id,
        "ids not increasing: {} then {}",
        first_id,
        second_id
    );

    let rows: u64 = conn
        .query_first(
            "SELECT COUNT(*) FROM users \
             WHERE name = 'John Doe' AND email = 'john@example.com' AND age = 25",
        )
        .unwrap()
        .unwrap();
    assert_eq!(rows, 2);
}
