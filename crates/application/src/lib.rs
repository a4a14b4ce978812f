//! tierdns application layer: ports for the collaborators the cache
//! engine consumes, and the use cases built on them.
pub mod ports;
pub mod use_cases;
