//! Declarative project models
//!
//! - **version**: semantic versions and selector predicates
//! - **author**: "Name <email>" author declarations
//! - **requirements**: registry and vendored requirement lists
//! - **package**: package.toml model (PackageData and sub-configs)
//! - **monorepo**: monorepo.toml model

pub mod author;
pub mod monorepo;
pub mod package;
pub mod requirements;
pub mod version;
