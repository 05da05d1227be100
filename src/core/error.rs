/// Userseed Error Module
///
/// This module defines the error types for the userseed tool. Every error
/// is fatal: the program reports it on standard error and exits with
/// status 1. Nothing is retried.
use thiserror::Error;

/// Error type covering every failure category of the seeding pipeline.
///
/// The variants mirror the pipeline stages:
/// - Bootstrap and client setup (`Init`)
/// - Session establishment (`Connection`)
/// - Statement execution (`Query`)
/// - Configuration loading and validation (`Config`)
/// - File system access while reading configuration (`Io`)
#[derive(Error, Debug)]
pub enum SeedError {
    /// Client or logging bootstrap failures before any network activity
    #[error("initialization error: {0}")]
    Init(String),

    /// Connect failures (authentication, reachability, database selection),
    /// carrying the server-reported message
    #[error("connection error: {0}")]
    Connection(#[source] mysql::Error),

    /// Statement rejection by the server (missing table, constraint
    /// violation, syntax)
    #[error("query error: {0}")]
    Query(#[source] mysql::Error),

    /// Missing, malformed, or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use SeedError as the error type.
pub type Result<T> = std::result::Result<T, SeedError>;
