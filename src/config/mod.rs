//! JSON configuration types for the demo tooling.

pub mod demo;
