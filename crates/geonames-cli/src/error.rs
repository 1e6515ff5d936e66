//! Error types for the GeoNames command-line host

use std::fmt;

use geonames_client::GeoNamesError;

#[derive(Debug)]
pub enum CliError {
    Lookup(GeoNamesError),
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Lookup(err) => write!(f, "Lookup failed: {}", err),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Lookup(err) => Some(err),
            CliError::Io(err) => Some(err),
            CliError::Config(_) => None,
        }
    }
}

impl From<GeoNamesError> for CliError {
    fn from(err: GeoNamesError) -> Self {
        CliError::Lookup(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
