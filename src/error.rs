//! Errors for the owl-schema library
use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Debug)]
pub enum Location {
    BytePosition(usize),
    Unknown,
}

impl From<usize> for Location {
    fn from(u: usize) -> Self {
        Location::BytePosition(u)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BytePosition(u) => write!(f, "Byte Position: {u}"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Error for the owl-schema library
///
/// Lookups never fail with an error; they return `None`. This type
/// only covers reading schema headers and requests that cannot be
/// given a meaning.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An IO Error
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    /// An error found while reading the header of a schema document
    #[error("Parsing Error: {0} at {1}")]
    ParserError(Box<dyn std::error::Error + Send + Sync>, Location),

    /// Data has been given that we cannot make sense of
    #[error("Validity Error: {0} at {1}")]
    ValidityError(String, Location),

    /// A command has been given that is invalid
    #[error("Command Error: {0}")]
    CommandError(String),
}

macro_rules! invalid {
    ($($arg:tt)*) => {
        $crate::error::SchemaError::ValidityError(format!($($arg)*), $crate::error::Location::Unknown)
    }
}

pub(crate) use invalid;

impl From<oxiri::IriParseError> for SchemaError {
    fn from(e: oxiri::IriParseError) -> Self {
        Self::ValidityError(e.to_string(), Location::Unknown)
    }
}

impl From<quick_xml::Error> for SchemaError {
    fn from(e: quick_xml::Error) -> Self {
        Self::ParserError(e.into(), Location::Unknown)
    }
}

impl From<quick_xml::events::attributes::AttrError> for SchemaError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::ParserError(e.into(), Location::Unknown)
    }
}
