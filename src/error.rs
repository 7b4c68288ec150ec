//! Error types for voxml operations.

use thiserror::Error;

/// Errors that can occur while resolving configuration.
///
/// Markup composition itself never fails: unsupported features degrade to
/// plain text or alternate constructs instead of returning errors. The only
/// fallible surface is configuration intake.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown platform preset: {0}")]
    UnknownPlatform(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
