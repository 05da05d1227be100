// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod db;
