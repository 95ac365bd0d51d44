#[path = "../../src/process/test_support.rs"]
mod fixtures;

pub use fixtures::*;
