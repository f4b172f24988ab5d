use thiserror::Error;

mod domain_types;
mod namespace;
mod title;

pub use domain_types::*;
pub use namespace::*;
pub use title::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid title {title:?}: {reason}")]
    InvalidTitle { title: String, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid user agent: {reason}")]
    InvalidUserAgent { reason: String },

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },
}
