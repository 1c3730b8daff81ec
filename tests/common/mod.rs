#![allow(dead_code)]

mod assertions;
mod fixtures;
mod helpers;
mod test_app;

// Re-export
pub use assertions::{assert_command_valid, assert_envelope_decays, assert_outputs_valid};
pub use fixtures::*;
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
