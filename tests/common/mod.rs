#![allow(dead_code)]
pub mod fixtures;
pub mod mock_upstream;

pub use fixtures::*;
pub use mock_upstream::CountingUpstream;
