//! Test-support utilities shared across the treemap workspace.

pub mod fuzzer;

pub use fuzzer::Fuzzer;
