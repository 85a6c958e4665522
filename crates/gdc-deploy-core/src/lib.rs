//! Core types and configuration for gdc-deploy.
//!
//! This crate defines the deploy target model ([`DeployTarget`]), the
//! built-in targets and optional `deploy.toml` schema ([`DeployConfig`]),
//! and shared error types.

pub mod config;
pub mod error;
pub mod target;

pub use config::{DeployConfig, ProjectConfig, TargetConfig};
pub use error::{Error, Result};
pub use target::{DeployTarget, Overrides};
