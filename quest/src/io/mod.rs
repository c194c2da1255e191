//! Side-effecting edges: the execution-service client, catalog and config files.

pub mod catalog_file;
pub mod config;
pub mod service;
