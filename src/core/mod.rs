//! Core infrastructure: errors and project loading

pub mod error;
pub mod project;
