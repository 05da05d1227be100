use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Result, SeedError};

/// Default MySQL port used when the configuration leaves it out.
pub const DEFAULT_PORT: u16 = 3306;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub mysql: MysqlConfig,
}

/// Connection parameters for one MySQL session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MysqlConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
}

impl MysqlConfig {
    /// Effective TCP port, falling back to the MySQL default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Checks that every parameter needed to reach the server is present.
    ///
    /// Connection attempts with blank fields are rejected here so that no
    /// network activity happens before the configuration is complete. An
    /// empty password is allowed; MySQL accounts may have none.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SeedError::Config("host must not be empty".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(SeedError::Config("username must not be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(SeedError::Config("database must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file at the given path.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| SeedError::Config(e.to_string()))
}

/// Location of the per-user configuration file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("userseed").join("config.toml"))
}

/// Resolves the connection parameters for this run.
///
/// A config file path passed on the command line (which must exist) takes
/// the place of the per-user config file; `MYSQL_*` environment variables
/// override whichever file was read. The result is validated before it is
/// returned, so callers can hand it straight to the connect step.
pub fn resolve(cli_path: Option<&str>) -> Result<MysqlConfig> {
    let mut mysql = match cli_path {
        Some(path) => {
            if !Path::new(path).is_file() {
                return Err(SeedError::Config(format!(
                    "config file not found: {}",
                    path
                )));
            }
            load_config(path)?.mysql
        }
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => load_config(path)?.mysql,
            None => MysqlConfig::default(),
        },
    };

    apply_overrides(&mut mysql, |name| std::env::var(name).ok())?;
    mysql.validate()?;
    Ok(mysql)
}

/// Applies `MYSQL_*` overrides from the given lookup to a loaded config.
fn apply_overrides<F>(mysql: &mut MysqlConfig, get: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = get("MYSQL_HOST") {
        mysql.host = host;
    }
    if let Some(port) = get("MYSQL_PORT") {
        let port = port
            .parse::<u16>()
            .map_err(|_| SeedError::Config(format!("invalid MYSQL_PORT: {}", port)))?;
        mysql.port = Some(port);
    }
    if let Some(user) = get("MYSQL_USER") {
        mysql.username = user;
    }
    if let Some(password) = get("MYSQL_PASSWORD") {
        mysql.password = password;
    }
    if let Some(database) = get("MYSQL_DATABASE") {
        mysql.database = database;
    }
    Ok(())
}
