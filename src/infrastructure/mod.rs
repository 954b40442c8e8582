//! Storage adapters for the traits in [`crate::domain::repositories`].

pub mod persistence;
