//! Integration test suite for the wharf CLI

mod helpers;
mod test_bump;
mod test_check;
mod test_install;
mod test_status;
mod test_update;
