//! Utility modules for alias handling and URL validation.

pub mod alias_generator;
pub mod url_validator;
