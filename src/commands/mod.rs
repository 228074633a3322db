//! Command implementations

mod bump;
mod check;
mod install;
mod status;
mod update;

pub use bump::run_bump;
pub use check::run_check;
pub use install::{InstallOptions, run_install};
pub use status::run_status;
pub use update::run_update;
